//! Page bookkeeping for the photo grid.
//!
//! The loader never talks to the library while holding partial state: a fetch
//! is split into `begin_fetch` (raises the in-flight flag and hands out a
//! [`PageRequest`]) and `finish_fetch` (applies the outcome and lowers the
//! flag). The async helpers below chain the two for callers that can await in
//! place; the grid service runs the middle part on the runtime instead.

use crate::library::{PhotoLibrary, PhotoPermissions};
use crate::types::{PageCursor, PermissionStatus, Photo, PhotoError, PhotoPage, DEFAULT_PAGE_SIZE};

/// A fetch the loader has committed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: usize,
    pub after: Option<String>,
}

/// How a fetch ended
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Access to the library was refused
    Denied,
    Page(PhotoPage),
    Failed(PhotoError),
}

#[derive(Debug)]
pub struct PhotoGridLoader {
    photos: Vec<Photo>,
    cursor: PageCursor,
    loading: bool,
    activated: bool,
    page_size: usize,
    last_error: Option<PhotoError>,
}

impl Default for PhotoGridLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PhotoGridLoader {
    pub fn new(page_size: usize) -> Self {
        Self {
            photos: Vec::new(),
            cursor: PageCursor::NotStarted,
            loading: false,
            activated: false,
            page_size,
            last_error: None,
        }
    }

    /// Loaded photos, in library order
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error from the most recent failed fetch, cleared by the next page
    pub fn last_error(&self) -> Option<&PhotoError> {
        self.last_error.as_ref()
    }

    /// Start a fetch after `after`, or from the beginning.
    ///
    /// Returns `None` while another fetch is in flight.
    pub fn begin_fetch(&mut self, after: Option<String>) -> Option<PageRequest> {
        if self.loading {
            tracing::debug!("Photo fetch already in flight, ignoring request");
            return None;
        }

        self.loading = true;
        Some(PageRequest {
            first: self.page_size,
            after,
        })
    }

    /// First fetch of the grid. Only the first call has any effect.
    pub fn activation_request(&mut self) -> Option<PageRequest> {
        if self.activated {
            return None;
        }
        self.activated = true;
        self.begin_fetch(None)
    }

    /// Fetch for the "near end of scroll" signal.
    ///
    /// Nothing happens until a page reported a continuation token, and
    /// nothing happens once the library ran out.
    pub fn next_page_request(&mut self) -> Option<PageRequest> {
        let after = self.cursor.token()?.to_string();
        self.begin_fetch(Some(after))
    }

    /// Apply the outcome of the fetch started by `begin_fetch`
    pub fn finish_fetch(&mut self, outcome: FetchOutcome) {
        self.loading = false;

        match outcome {
            FetchOutcome::Denied => {
                tracing::warn!("Photo library permission denied");
            }
            FetchOutcome::Page(page) => {
                tracing::debug!(
                    "Loaded {} photos (more: {})",
                    page.photos.len(),
                    page.has_next_page
                );
                self.cursor = PageCursor::after_page(&page);
                self.photos.extend(page.photos);
                self.last_error = None;
            }
            FetchOutcome::Failed(e) => {
                tracing::error!("Failed to fetch photos: {}", e);
                self.last_error = Some(e);
            }
        }
    }

    /// Fetch one page in place. Returns whether a fetch actually ran.
    pub async fn fetch_page(
        &mut self,
        library: &dyn PhotoLibrary,
        permissions: &dyn PhotoPermissions,
        after: Option<String>,
    ) -> bool {
        match self.begin_fetch(after) {
            Some(request) => {
                let outcome = run_request(library, permissions, &request).await;
                self.finish_fetch(outcome);
                true
            }
            None => false,
        }
    }

    /// Mount-time load of the first page
    pub async fn activate(
        &mut self,
        library: &dyn PhotoLibrary,
        permissions: &dyn PhotoPermissions,
    ) -> bool {
        match self.activation_request() {
            Some(request) => {
                let outcome = run_request(library, permissions, &request).await;
                self.finish_fetch(outcome);
                true
            }
            None => false,
        }
    }

    pub async fn load_next_page(
        &mut self,
        library: &dyn PhotoLibrary,
        permissions: &dyn PhotoPermissions,
    ) -> bool {
        match self.next_page_request() {
            Some(request) => {
                let outcome = run_request(library, permissions, &request).await;
                self.finish_fetch(outcome);
                true
            }
            None => false,
        }
    }
}

/// Ask for access, then fetch the requested page
pub async fn run_request(
    library: &dyn PhotoLibrary,
    permissions: &dyn PhotoPermissions,
    request: &PageRequest,
) -> FetchOutcome {
    if permissions.request().await != PermissionStatus::Granted {
        return FetchOutcome::Denied;
    }

    match library.get_photos(request.first, request.after.as_deref()).await {
        Ok(page) => FetchOutcome::Page(page),
        Err(e) => FetchOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{photo_uris, FakeLibrary, FixedPermissions};

    fn page(uris: &[&str], next: Option<&str>) -> PhotoPage {
        PhotoPage {
            photos: uris.iter().map(|u| Photo::new(*u)).collect(),
            has_next_page: next.is_some(),
            end_cursor: next.map(str::to_string),
        }
    }

    #[test]
    fn test_second_begin_while_in_flight_is_ignored() {
        let mut loader = PhotoGridLoader::default();
        let first = loader.begin_fetch(None);
        assert_eq!(
            first,
            Some(PageRequest {
                first: 20,
                after: None
            })
        );

        assert!(loader.begin_fetch(None).is_none());
        assert!(loader.is_loading());
        assert!(loader.photos().is_empty());
        assert_eq!(loader.cursor(), &PageCursor::NotStarted);
    }

    #[test]
    fn test_finish_appends_and_moves_cursor() {
        let mut loader = PhotoGridLoader::new(2);
        loader.begin_fetch(None);
        loader.finish_fetch(FetchOutcome::Page(page(&["a", "b"], Some("b"))));

        assert!(!loader.is_loading());
        assert_eq!(loader.cursor(), &PageCursor::HasMore("b".to_string()));

        let request = loader.next_page_request().unwrap();
        assert_eq!(request.after.as_deref(), Some("b"));
        loader.finish_fetch(FetchOutcome::Page(page(&["c"], None)));

        let uris: Vec<&str> = loader.photos().iter().map(|p| p.uri.as_str()).collect();
        assert_eq!(uris, vec!["a", "b", "c"]);
        assert!(loader.cursor().is_exhausted());
    }

    #[test]
    fn test_next_page_before_first_load_is_noop() {
        let mut loader = PhotoGridLoader::default();
        assert!(loader.next_page_request().is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_next_page_after_exhausted_is_noop() {
        let mut loader = PhotoGridLoader::default();
        loader.begin_fetch(None);
        loader.finish_fetch(FetchOutcome::Page(page(&["a"], None)));
        assert!(loader.next_page_request().is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_denied_clears_flag_and_keeps_cursor() {
        let mut loader = PhotoGridLoader::default();
        loader.activation_request();
        loader.finish_fetch(FetchOutcome::Denied);

        assert!(!loader.is_loading());
        assert_eq!(loader.cursor(), &PageCursor::NotStarted);
        assert!(loader.last_error().is_none());
    }

    #[test]
    fn test_failure_is_recorded_and_retryable() {
        let mut loader = PhotoGridLoader::default();
        loader.begin_fetch(None);
        loader.finish_fetch(FetchOutcome::Page(page(&["a"], Some("a"))));

        loader.next_page_request();
        loader.finish_fetch(FetchOutcome::Failed(PhotoError::Read("io".into())));
        assert!(loader.last_error().is_some());
        assert_eq!(loader.cursor(), &PageCursor::HasMore("a".to_string()));
        assert_eq!(loader.photos().len(), 1);

        let retry = loader.next_page_request().unwrap();
        assert_eq!(retry.after.as_deref(), Some("a"));
        loader.finish_fetch(FetchOutcome::Page(page(&["b"], None)));
        assert!(loader.last_error().is_none());
        assert_eq!(loader.photos().len(), 2);
    }

    #[test]
    fn test_activation_runs_once() {
        let mut loader = PhotoGridLoader::default();
        assert!(loader.activation_request().is_some());
        loader.finish_fetch(FetchOutcome::Page(page(&["a"], Some("a"))));
        assert!(loader.activation_request().is_none());
    }

    #[tokio::test]
    async fn test_scrolling_to_the_end_keeps_library_order() {
        let library = FakeLibrary::with_photos(45);
        let permissions = FixedPermissions::granted();
        let mut loader = PhotoGridLoader::default();

        assert!(loader.activate(&library, &permissions).await);
        while loader.load_next_page(&library, &permissions).await {}

        assert_eq!(photo_uris(loader.photos()), library.all_uris());
        assert_eq!(library.calls(), 3);
        assert!(loader.cursor().is_exhausted());

        assert!(!loader.load_next_page(&library, &permissions).await);
        assert_eq!(library.calls(), 3);
    }

    #[tokio::test]
    async fn test_denied_permission_never_reaches_library() {
        let library = FakeLibrary::with_photos(5);
        let permissions = FixedPermissions::denied();
        let mut loader = PhotoGridLoader::default();

        assert!(loader.activate(&library, &permissions).await);
        assert_eq!(library.calls(), 0);
        assert!(loader.photos().is_empty());
        assert!(!loader.load_next_page(&library, &permissions).await);
    }

    #[tokio::test]
    async fn test_fetch_page_from_explicit_cursor() {
        let library = FakeLibrary::with_photos(30);
        let permissions = FixedPermissions::granted();
        let mut loader = PhotoGridLoader::new(5);

        assert!(
            loader
                .fetch_page(&library, &permissions, Some("photo-009".to_string()))
                .await
        );
        assert_eq!(loader.photos().first().map(|p| p.uri.as_str()), Some("photo-010"));
        assert_eq!(loader.photos().len(), 5);
    }
}

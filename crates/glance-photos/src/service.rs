//! Photo backend: async page fetching.
//! Library work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::library::{PhotoLibrary, PhotoPermissions};
use crate::loader::{run_request, FetchOutcome, PageRequest};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum PhotoServiceMessage {
    /// Result of a page fetch started with `request_page`
    PageDone(FetchOutcome),
}

/// Request a page asynchronously.
/// Sends `PageDone` on the channel when complete.
pub fn request_page(
    tx: &Sender<PhotoServiceMessage>,
    runtime: &tokio::runtime::Handle,
    library: Arc<dyn PhotoLibrary>,
    permissions: Arc<dyn PhotoPermissions>,
    request: PageRequest,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tracing::debug!(
            "Fetching {} photos after {:?}",
            request.first,
            request.after
        );
        let outcome = run_request(library.as_ref(), permissions.as_ref(), &request).await;
        if tx.send(PhotoServiceMessage::PageDone(outcome)).is_err() {
            tracing::debug!("Photo grid gone before page arrived");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeLibrary, FixedPermissions};

    #[tokio::test]
    async fn test_request_page_sends_outcome() {
        let (tx, rx) = std::sync::mpsc::channel();
        let library = Arc::new(FakeLibrary::with_photos(3));

        request_page(
            &tx,
            &tokio::runtime::Handle::current(),
            library.clone(),
            Arc::new(FixedPermissions::granted()),
            PageRequest {
                first: 2,
                after: None,
            },
        );

        let msg = loop {
            match rx.try_recv() {
                Ok(msg) => break msg,
                Err(_) => tokio::task::yield_now().await,
            }
        };

        match msg {
            PhotoServiceMessage::PageDone(FetchOutcome::Page(page)) => {
                assert_eq!(page.photos.len(), 2);
                assert!(page.has_next_page);
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(library.calls(), 1);
    }

    #[tokio::test]
    async fn test_request_page_reports_denial() {
        let (tx, rx) = std::sync::mpsc::channel();

        request_page(
            &tx,
            &tokio::runtime::Handle::current(),
            Arc::new(FakeLibrary::with_photos(3)),
            Arc::new(FixedPermissions::denied()),
            PageRequest {
                first: 2,
                after: None,
            },
        );

        let msg = loop {
            match rx.try_recv() {
                Ok(msg) => break msg,
                Err(_) => tokio::task::yield_now().await,
            }
        };
        assert!(matches!(
            msg,
            PhotoServiceMessage::PageDone(FetchOutcome::Denied)
        ));
    }
}

use serde::{Deserialize, Serialize};

/// Photos requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Opaque handle to an image owned by the library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    pub uri: String,
}

impl Photo {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// One page as returned by a library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// Pagination position of the loader
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageCursor {
    /// No page has been loaded yet
    #[default]
    NotStarted,
    /// More photos follow the given token
    HasMore(String),
    /// The library reported its last page
    Exhausted,
}

impl PageCursor {
    /// Cursor after a page has been appended.
    ///
    /// A library claiming more pages without a token cannot be resumed, so
    /// that counts as the end.
    pub fn after_page(page: &PhotoPage) -> Self {
        match (&page.end_cursor, page.has_next_page) {
            (Some(token), true) => Self::HasMore(token.clone()),
            _ => Self::Exhausted,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::HasMore(token) => Some(token),
            _ => None,
        }
    }
}

/// Answer from the platform's photo permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Photo library errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhotoError {
    #[error("Photo library unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
    #[error("Failed to read photos: {0}")]
    Read(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(has_next_page: bool, end_cursor: Option<&str>) -> PhotoPage {
        PhotoPage {
            photos: vec![Photo::new("a.jpg")],
            has_next_page,
            end_cursor: end_cursor.map(str::to_string),
        }
    }

    #[test]
    fn test_cursor_defaults_to_not_started() {
        assert_eq!(PageCursor::default(), PageCursor::NotStarted);
        assert!(PageCursor::default().token().is_none());
    }

    #[test]
    fn test_cursor_after_page_with_more() {
        let cursor = PageCursor::after_page(&page(true, Some("t1")));
        assert_eq!(cursor, PageCursor::HasMore("t1".to_string()));
        assert_eq!(cursor.token(), Some("t1"));
    }

    #[test]
    fn test_cursor_after_last_page() {
        assert!(PageCursor::after_page(&page(false, Some("t1"))).is_exhausted());
        assert!(PageCursor::after_page(&page(false, None)).is_exhausted());
    }

    #[test]
    fn test_cursor_more_pages_without_token_is_exhausted() {
        assert!(PageCursor::after_page(&page(true, None)).is_exhausted());
    }
}

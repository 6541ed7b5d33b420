use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::library::{PhotoLibrary, PhotoPermissions};
use crate::types::{PermissionStatus, Photo, PhotoError, PhotoPage};

/// In-memory library named `photo-000`, `photo-001`, ...
pub struct FakeLibrary {
    photos: Vec<Photo>,
    calls: AtomicUsize,
}

impl FakeLibrary {
    pub fn with_photos(count: usize) -> Self {
        Self {
            photos: (0..count)
                .map(|i| Photo::new(format!("photo-{:03}", i)))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn all_uris(&self) -> Vec<String> {
        photo_uris(&self.photos)
    }
}

#[async_trait]
impl PhotoLibrary for FakeLibrary {
    async fn get_photos(&self, first: usize, after: Option<&str>) -> Result<PhotoPage, PhotoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let start = match after {
            None => 0,
            Some(token) => {
                self.photos
                    .iter()
                    .position(|p| p.uri == token)
                    .ok_or_else(|| PhotoError::InvalidCursor(token.to_string()))?
                    + 1
            }
        };
        let photos: Vec<Photo> = self.photos.iter().skip(start).take(first).cloned().collect();
        let has_next_page = start + photos.len() < self.photos.len();

        Ok(PhotoPage {
            end_cursor: photos.last().map(|p| p.uri.clone()),
            photos,
            has_next_page,
        })
    }
}

pub struct FixedPermissions(PermissionStatus);

impl FixedPermissions {
    pub fn granted() -> Self {
        Self(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self(PermissionStatus::Denied)
    }
}

#[async_trait]
impl PhotoPermissions for FixedPermissions {
    async fn request(&self) -> PermissionStatus {
        self.0
    }
}

pub fn photo_uris(photos: &[Photo]) -> Vec<String> {
    photos.iter().map(|p| p.uri.clone()).collect()
}

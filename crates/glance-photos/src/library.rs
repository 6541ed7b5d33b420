//! Photo sources: the platform seams plus a directory-backed library.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::types::{PermissionStatus, Photo, PhotoError, PhotoPage};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "heic", "webp"];

/// Paginated access to a photo library.
///
/// Pages must not overlap: resuming after `end_cursor` yields only photos that
/// were not part of any earlier page.
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Fetch up to `first` photos, starting after `after` or from the beginning.
    async fn get_photos(&self, first: usize, after: Option<&str>) -> Result<PhotoPage, PhotoError>;
}

/// Platform permission prompt for the photo library
#[async_trait]
pub trait PhotoPermissions: Send + Sync {
    async fn request(&self) -> PermissionStatus;
}

/// Photos found under a local directory, ordered by path.
///
/// The cursor is the uri of the last photo handed out.
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan(root: &Path) -> Result<Vec<Photo>, PhotoError> {
        if !root.is_dir() {
            return Err(PhotoError::Unavailable(root.display().to_string()));
        }

        let mut photos = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| PhotoError::Read(e.to_string()))?;
            if entry.file_type().is_file() && is_image(entry.path()) {
                photos.push(Photo::new(entry.path().to_string_lossy()));
            }
        }
        Ok(photos)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Slice one page out of the full ordered listing.
///
/// The listing is in walk order, which is component-wise path order, so a
/// page resumes at the first photo after the token whether or not the token's
/// file still exists.
fn paginate(all: Vec<Photo>, first: usize, after: Option<&str>) -> Result<PhotoPage, PhotoError> {
    let start = match after {
        None => 0,
        Some("") => return Err(PhotoError::InvalidCursor(String::new())),
        Some(token) => {
            let token = Path::new(token);
            all.iter()
                .position(|photo| Path::new(&photo.uri) > token)
                .unwrap_or(all.len())
        }
    };

    let end = start.saturating_add(first).min(all.len());
    let has_next_page = end < all.len();
    let photos: Vec<Photo> = all.into_iter().skip(start).take(end - start).collect();
    let end_cursor = photos.last().map(|photo| photo.uri.clone());

    Ok(PhotoPage {
        photos,
        has_next_page,
        end_cursor,
    })
}

#[async_trait]
impl PhotoLibrary for DirectoryLibrary {
    async fn get_photos(&self, first: usize, after: Option<&str>) -> Result<PhotoPage, PhotoError> {
        let root = self.root.clone();
        let all = tokio::task::spawn_blocking(move || Self::scan(&root))
            .await
            .map_err(|e| PhotoError::Read(e.to_string()))??;

        tracing::debug!(
            "Scanned {} photos under {}",
            all.len(),
            self.root.display()
        );
        paginate(all, first, after)
    }
}

/// Grants access when the directory can be listed
#[derive(Debug, Clone)]
pub struct DirectoryPermissions {
    root: PathBuf,
}

impl DirectoryPermissions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PhotoPermissions for DirectoryPermissions {
    async fn request(&self) -> PermissionStatus {
        match tokio::fs::read_dir(&self.root).await {
            Ok(_) => PermissionStatus::Granted,
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", self.root.display(), e);
                PermissionStatus::Denied
            }
        }
    }
}

//! Photo grid for Glance
//!
//! Pages through a photo library, keeps the loaded photos in library order
//! and lays them out as a fixed-size tile grid.

pub mod grid;
pub mod library;
pub mod loader;
pub mod service;
pub mod types;

#[cfg(test)]
mod test_support;

pub use grid::{GridLayout, PhotoGrid, PhotoTile};
pub use library::{DirectoryLibrary, DirectoryPermissions, PhotoLibrary, PhotoPermissions};
pub use loader::{run_request, FetchOutcome, PageRequest, PhotoGridLoader};
pub use service::PhotoServiceMessage;
pub use types::*;

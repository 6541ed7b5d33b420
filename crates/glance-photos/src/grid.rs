use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::library::{PhotoLibrary, PhotoPermissions};
use crate::loader::{PageRequest, PhotoGridLoader};
use crate::service::{self, PhotoServiceMessage};
use crate::types::Photo;

/// Column count and gutter of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub item_margin: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            item_margin: 1.0,
        }
    }
}

impl GridLayout {
    pub fn new(columns: usize, item_margin: f64) -> Self {
        Self {
            columns: columns.max(1),
            item_margin,
        }
    }

    /// Side length of every tile for a container `width` wide
    pub fn tile_size(&self, width: f64) -> f64 {
        let columns = self.columns.max(1) as f64;
        let gutters = self.item_margin * (columns - 1.0);
        ((width - gutters) / columns).max(0.0)
    }

    /// Geometry of the tile at `index`
    pub fn tile(&self, index: usize, uri: &str, width: f64) -> PhotoTile {
        let columns = self.columns.max(1);
        PhotoTile {
            uri: uri.to_string(),
            size: self.tile_size(width),
            margin_left: if index % columns == 0 { 0.0 } else { self.item_margin },
            margin_top: if index < columns { 0.0 } else { self.item_margin },
        }
    }
}

/// A laid-out, tappable photo. Keyed by `uri`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoTile {
    pub uri: String,
    pub size: f64,
    pub margin_left: f64,
    pub margin_top: f64,
}

type PressHandler = Box<dyn FnMut(&str) + Send>;

/// Scrolling photo grid: loader state, layout and the async plumbing that
/// feeds it.
pub struct PhotoGrid {
    loader: PhotoGridLoader,
    layout: GridLayout,
    on_press: PressHandler,
    library: Arc<dyn PhotoLibrary>,
    permissions: Arc<dyn PhotoPermissions>,
    runtime: tokio::runtime::Handle,
    tx: Sender<PhotoServiceMessage>,
    rx: Receiver<PhotoServiceMessage>,
}

impl PhotoGrid {
    pub fn new(
        library: Arc<dyn PhotoLibrary>,
        permissions: Arc<dyn PhotoPermissions>,
        runtime: tokio::runtime::Handle,
        page_size: usize,
        layout: GridLayout,
    ) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            loader: PhotoGridLoader::new(page_size),
            layout,
            on_press: Box::new(|_| {}),
            library,
            permissions,
            runtime,
            tx,
            rx,
        }
    }

    /// Callback invoked with the uri of a tapped tile
    pub fn with_on_press(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_press = Box::new(handler);
        self
    }

    pub fn loader(&self) -> &PhotoGridLoader {
        &self.loader
    }

    pub fn photos(&self) -> &[Photo] {
        self.loader.photos()
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Load the first page when the grid is first shown
    pub fn activate(&mut self) -> bool {
        let request = self.loader.activation_request();
        self.dispatch(request)
    }

    /// Near-end-of-scroll signal from the view
    pub fn on_end_reached(&mut self) -> bool {
        let request = self.loader.next_page_request();
        self.dispatch(request)
    }

    fn dispatch(&self, request: Option<PageRequest>) -> bool {
        match request {
            Some(request) => {
                service::request_page(
                    &self.tx,
                    &self.runtime,
                    self.library.clone(),
                    self.permissions.clone(),
                    request,
                );
                true
            }
            None => false,
        }
    }

    /// Apply a finished fetch, if one arrived. Call from the UI thread.
    pub fn poll_channel(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(PhotoServiceMessage::PageDone(outcome)) => {
                self.loader.finish_fetch(outcome);
                true
            }
            Err(_) => false,
        }
    }

    /// Tiles for every loaded photo in a container `width` wide
    pub fn tiles(&self, width: f64) -> Vec<PhotoTile> {
        self.loader
            .photos()
            .iter()
            .enumerate()
            .map(|(index, photo)| self.layout.tile(index, &photo.uri, width))
            .collect()
    }

    /// Tap on the tile at `index`. Returns false when there is no such tile.
    pub fn press(&mut self, index: usize) -> bool {
        match self.loader.photos().get(index) {
            Some(photo) => {
                let uri = photo.uri.clone();
                (self.on_press)(&uri);
                true
            }
            None => false,
        }
    }
}

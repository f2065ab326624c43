//! Photo Gallery Core Domain Logic
//!
//! This crate contains:
//! - Photo entity
//! - Photo sources (bundled samples, media index)
//! - Gallery state store and detail-view cursor
//! - Controller serializing user actions
//! - Camera / picker collaborators
//! - Configuration
//! - Error types

pub mod acquire;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod photo;
pub mod source;
pub mod store;

pub use acquire::{capture_file_name, pick_local_file, Camera, CameraCapture, ImageProvider, PickerFn};
pub use config::{GalleryConfig, LibraryConfig, LoggingConfig};
pub use controller::{GalleryCommand, GalleryController, GalleryHandle};
pub use error::{GalleryError, Result};
pub use navigation::{DetailCursor, PageCursor, DEFAULT_PAGE_SIZE};
pub use photo::{ImageRef, Photo, PhotoId};
pub use source::{
    is_supported_image, DirectoryMediaIndex, InMemoryMediaIndex, MediaIndex, MediaLibrarySource,
    MediaRecord, PhotoSource, SamplePhotoSource,
};
pub use store::{GallerySnapshot, GalleryStore};

use std::sync::Arc;

/// Build the photo source described by `config`
pub fn source_for(config: &GalleryConfig) -> Arc<dyn PhotoSource> {
    match &config.gallery.library_dir {
        Some(dir) => {
            tracing::info!("Using media library at {:?}", dir);
            Arc::new(MediaLibrarySource::new(DirectoryMediaIndex::new(dir)))
        }
        None => {
            tracing::info!("Using bundled sample photos");
            Arc::new(SamplePhotoSource)
        }
    }
}

/// Start a gallery for `config` on the current tokio runtime
pub fn start(config: &GalleryConfig) -> GalleryHandle {
    let store = GalleryStore::new(config.gallery.page_size);
    GalleryController::spawn(store, source_for(config))
}

//! Image acquisition collaborators (camera, picker)
//!
//! The gallery never talks to a camera or picker directly; it awaits an
//! [`ImageProvider`] and adds whatever reference comes back.

use crate::error::{GalleryError, Result};
use crate::photo::ImageRef;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Something that can hand the gallery a new image reference
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// `Ok(None)` means the user cancelled.
    async fn request_image(&self) -> Result<Option<ImageRef>>;
}

/// Device camera: writes a picture to `target`, returns false if nothing was taken
#[async_trait]
pub trait Camera: Send + Sync {
    async fn take_picture(&self, target: &Path) -> Result<bool>;
}

/// File name for a capture taken at `time`
pub fn capture_file_name(time: DateTime<Local>) -> String {
    format!("PHOTO_{}.jpg", time.format("%Y%m%d_%H%M%S"))
}

/// Camera capture into a directory of timestamped files
pub struct CameraCapture<C> {
    camera: C,
    capture_dir: PathBuf,
}

impl<C: Camera> CameraCapture<C> {
    pub fn new(camera: C, capture_dir: impl Into<PathBuf>) -> Self {
        Self {
            camera,
            capture_dir: capture_dir.into(),
        }
    }

    pub fn capture_dir(&self) -> &Path {
        &self.capture_dir
    }
}

#[async_trait]
impl<C: Camera> ImageProvider for CameraCapture<C> {
    async fn request_image(&self) -> Result<Option<ImageRef>> {
        tokio::fs::create_dir_all(&self.capture_dir).await?;

        let target = self.capture_dir.join(capture_file_name(Local::now()));
        tracing::debug!("Capturing to {:?}", target);

        if self.camera.take_picture(&target).await? {
            Ok(Some(ImageRef::external(format!("file://{}", target.display()))))
        } else {
            tracing::debug!("Capture cancelled");
            Ok(None)
        }
    }
}

/// Picker backed by an async closure
pub struct PickerFn<F> {
    pick: F,
}

impl<F> PickerFn<F> {
    pub fn new(pick: F) -> Self {
        Self { pick }
    }
}

#[async_trait]
impl<F, Fut> ImageProvider for PickerFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<ImageRef>>> + Send + 'static,
{
    async fn request_image(&self) -> Result<Option<ImageRef>> {
        (self.pick)().await
    }
}

/// Pick an image file from the local filesystem
pub async fn pick_local_file(path: PathBuf) -> Result<Option<ImageRef>> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| GalleryError::Acquire(format!("{}: {}", path.display(), e)))?;

    if !metadata.is_file() || !crate::source::is_supported_image(&path) {
        return Err(GalleryError::Acquire(format!(
            "{} is not a supported image",
            path.display()
        )));
    }

    let path = tokio::fs::canonicalize(&path).await?;
    Ok(Some(ImageRef::external(format!("file://{}", path.display()))))
}

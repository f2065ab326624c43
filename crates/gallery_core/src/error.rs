//! Gallery error types

use thiserror::Error;

/// Main gallery error type
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Recoverable Errors (ignore or notify user, continue) =====
    #[error("Index {index} out of range for {len} photos")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Photo source error: {0}")]
    Source(String),

    #[error("Image acquisition failed: {0}")]
    Acquire(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Fatal Errors (controller or startup unusable) =====
    #[error("Gallery controller is no longer running")]
    ControllerClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::IndexOutOfRange { .. }
                | GalleryError::Source(_)
                | GalleryError::Acquire(_)
                | GalleryError::Io(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::IndexOutOfRange { index, .. } => format!("No photo at position {}", index),
            GalleryError::Source(msg) => format!("Cannot load photos: {}", msg),
            GalleryError::Acquire(msg) => format!("Cannot add photo: {}", msg),
            GalleryError::ControllerClosed => "Gallery stopped. Please restart.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<toml::de::Error> for GalleryError {
    fn from(e: toml::de::Error) -> Self {
        GalleryError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for GalleryError {
    fn from(e: toml::ser::Error) -> Self {
        GalleryError::Config(e.to_string())
    }
}

//! Photo entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque photo identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the pixels of a photo live
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ImageRef {
    /// Content handle to a device-stored image (e.g. `content://...`, `file://...`)
    #[serde(rename = "external")]
    External(String),
    /// Name of an image bundled with the application
    #[serde(rename = "asset")]
    Asset(String),
}

impl ImageRef {
    pub fn external(uri: impl Into<String>) -> Self {
        ImageRef::External(uri.into())
    }

    pub fn asset(name: impl Into<String>) -> Self {
        ImageRef::Asset(name.into())
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ImageRef::External(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::External(s) | ImageRef::Asset(s) => s,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::External(uri) => write!(f, "{}", uri),
            ImageRef::Asset(name) => write!(f, "asset:{}", name),
        }
    }
}

/// One displayable photo.
///
/// Fields are read-only; the store replaces whole entries instead of mutating them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    id: PhotoId,
    image: ImageRef,
    title: String,
    description: String,
    is_favorite: bool,
    created_at: DateTime<Utc>,
}

impl Photo {
    /// Create a photo with a generated id, stamped with the current time
    pub fn new(image: ImageRef, title: impl Into<String>) -> Self {
        Self {
            id: PhotoId::generate(),
            image,
            title: title.into(),
            description: String::new(),
            is_favorite: false,
            created_at: Utc::now(),
        }
    }

    /// Photo backed by a bundled asset
    pub fn from_asset(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(ImageRef::asset(name), title)
    }

    /// Photo backed by an external content reference
    pub fn from_uri(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(ImageRef::external(uri), title)
    }

    pub fn with_id(mut self, id: PhotoId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Copy of this photo with the favorite flag flipped
    pub fn toggled_favorite(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }

    pub fn id(&self) -> &PhotoId {
        &self.id
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

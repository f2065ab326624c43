//! Photo sources
//!
//! A source produces the full ordered photo list; the store slices pages out of it.
//! - `SamplePhotoSource`: bundled sample assets
//! - `MediaLibrarySource`: photos from an external media index

use crate::error::{GalleryError, Result};
use crate::photo::{Photo, PhotoId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Produces the ordered list of photos the gallery starts from
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn load_photos(&self) -> Result<Vec<Photo>>;
}

/// Bundled sample photos (asset name, title)
const SAMPLE_PHOTOS: [(&str, &str); 10] = [
    ("image1", "Nature View"),
    ("image2", "Beach Sunset"),
    ("image3", "City Skyline"),
    ("image4", "Forest Trail"),
    ("image5", "Mountain Peak"),
    ("image6", "Desert Landscape"),
    ("image7", "Waterfall"),
    ("image8", "Autumn Colors"),
    ("image9", "Lake"),
    ("image10", "Starry Night"),
];

/// Fixed list of photos shipped with the application
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplePhotoSource;

#[async_trait]
impl PhotoSource for SamplePhotoSource {
    async fn load_photos(&self) -> Result<Vec<Photo>> {
        Ok(SAMPLE_PHOTOS
            .iter()
            .map(|(asset, title)| Photo::from_asset(*asset, *title))
            .collect())
    }
}

/// One row of an external media index
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    pub id: String,
    pub uri: String,
    pub display_name: String,
    pub date_added: DateTime<Utc>,
}

/// Query interface of an external media index
#[async_trait]
pub trait MediaIndex: Send + Sync {
    async fn query_images(&self) -> Result<Vec<MediaRecord>>;
}

/// Photos backed by a media index, newest first
pub struct MediaLibrarySource<I> {
    index: I,
}

impl<I: MediaIndex> MediaLibrarySource<I> {
    pub fn new(index: I) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &I {
        &self.index
    }
}

#[async_trait]
impl<I: MediaIndex> PhotoSource for MediaLibrarySource<I> {
    async fn load_photos(&self) -> Result<Vec<Photo>> {
        let mut records = self.index.query_images().await?;
        records.sort_by(|a, b| b.date_added.cmp(&a.date_added));

        tracing::debug!("Media index returned {} images", records.len());

        Ok(records
            .into_iter()
            .map(|record| {
                Photo::from_uri(record.uri, record.display_name)
                    .with_id(PhotoId::new(record.id))
                    .with_created_at(record.date_added)
            })
            .collect())
    }
}

/// Media index held in memory
#[derive(Default)]
pub struct InMemoryMediaIndex {
    records: RwLock<Vec<MediaRecord>>,
}

impl InMemoryMediaIndex {
    pub fn new(records: Vec<MediaRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Register a newly stored image
    pub fn insert(&self, record: MediaRecord) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl MediaIndex for InMemoryMediaIndex {
    async fn query_images(&self) -> Result<Vec<MediaRecord>> {
        Ok(self.records.read().clone())
    }
}

/// Media index over the image files of a single directory
#[derive(Debug, Clone)]
pub struct DirectoryMediaIndex {
    root: PathBuf,
}

impl DirectoryMediaIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_for(path: &Path, modified: DateTime<Utc>) -> MediaRecord {
        let path_str = path.to_string_lossy();
        MediaRecord {
            id: format!("{:016x}", xxh3_64(path_str.as_bytes())),
            uri: format!("file://{}", path_str),
            display_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            date_added: modified,
        }
    }
}

#[async_trait]
impl MediaIndex for DirectoryMediaIndex {
    async fn query_images(&self) -> Result<Vec<MediaRecord>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            GalleryError::Source(format!("cannot read {}: {}", self.root.display(), e))
        })?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_supported_image(&path) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            records.push(Self::record_for(&path, modified));
        }

        Ok(records)
    }
}

/// Check if a file is a supported image format
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            matches!(
                e.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "heic"
            )
        })
        .unwrap_or(false)
}

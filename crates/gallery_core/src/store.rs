//! Gallery state store

use crate::error::Result;
use crate::navigation::{DetailCursor, PageCursor};
use crate::photo::{ImageRef, Photo, PhotoId};
use crate::source::PhotoSource;
use serde::Serialize;

/// Read-only copy of the gallery state handed to views
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GallerySnapshot {
    pub items: Vec<Photo>,
    pub selected_index: Option<usize>,
    pub is_loading: bool,
    pub current_page: usize,
}

impl GallerySnapshot {
    /// Photo shown in the detail view, if open
    pub fn selected_photo(&self) -> Option<&Photo> {
        self.items.get(self.selected_index?)
    }
}

/// Visible photo list plus the detail-view cursor.
///
/// Every operation leaves the cursor either `Closed` or pointing at a valid index.
#[derive(Debug, Clone, Default)]
pub struct GalleryStore {
    items: Vec<Photo>,
    cursor: DetailCursor,
    pages: PageCursor,
    is_loading: bool,
}

impl GalleryStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            pages: PageCursor::new(page_size),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Photo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    pub fn cursor(&self) -> DetailCursor {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_page(&self) -> usize {
        self.pages.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pages.page_size()
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.items.get(self.cursor.index()?)
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            items: self.items.clone(),
            selected_index: self.cursor.index(),
            is_loading: self.is_loading,
            current_page: self.pages.current_page(),
        }
    }

    // ===== Loading =====

    /// Load the current page from `source`, replacing the visible items
    pub async fn load(&mut self, source: &dyn PhotoSource) -> Result<usize> {
        self.begin_load();
        let fetched = source.load_photos().await;
        self.finish_load(fetched)
    }

    /// Advance one page and load it
    pub async fn load_next_page(&mut self, source: &dyn PhotoSource) -> Result<usize> {
        self.advance_page();
        self.load(source).await
    }

    /// Move the page cursor forward without loading
    pub fn advance_page(&mut self) {
        self.pages.advance();
    }

    /// Mark a load as in flight
    pub fn begin_load(&mut self) {
        self.is_loading = true;
        tracing::debug!("Loading page {}", self.pages.current_page());
    }

    /// Apply a fetch result: slice the current page out of it and replace the items.
    ///
    /// A failed fetch leaves the gallery empty and not loading; the error is returned.
    pub fn finish_load(&mut self, fetched: Result<Vec<Photo>>) -> Result<usize> {
        self.is_loading = false;
        self.cursor.clear();

        match fetched {
            Ok(mut all) => {
                let range = self.pages.bounds(all.len());
                let total = all.len();
                self.items = all.drain(range).collect();
                tracing::info!(
                    "Loaded page {} ({} of {} photos)",
                    self.pages.current_page(),
                    self.items.len(),
                    total
                );
                Ok(self.items.len())
            }
            Err(e) => {
                self.items.clear();
                tracing::warn!("Photo source failed: {}", e);
                Err(e)
            }
        }
    }

    // ===== Detail navigation =====

    /// Open the detail view on `index`
    pub fn select_photo(&mut self, index: usize) -> Result<()> {
        self.cursor.select(index, self.items.len())?;
        tracing::debug!("Selected photo {}", index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.cursor.clear();
    }

    pub fn next_photo(&mut self) {
        self.cursor.next(self.items.len());
    }

    pub fn previous_photo(&mut self) {
        self.cursor.previous(self.items.len());
    }

    // ===== Mutations =====

    /// Flip the favorite flag of the photo in the detail view
    pub fn toggle_favorite_selected(&mut self) -> bool {
        match self.cursor.index() {
            Some(index) => self.toggle_favorite(index),
            None => false,
        }
    }

    /// Flip the favorite flag of the photo at `index`. Returns false for an invalid index.
    pub fn toggle_favorite(&mut self, index: usize) -> bool {
        let Some(photo) = self.items.get(index) else {
            tracing::debug!("Ignoring favorite toggle for stale index {}", index);
            return false;
        };
        let toggled = photo.toggled_favorite();
        self.items[index] = toggled;
        true
    }

    /// Prepend a new photo. An empty or missing title becomes `Photo {n+1}`.
    pub fn add_new_photo(&mut self, image: ImageRef, title: Option<&str>) -> PhotoId {
        let title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Photo {}", self.items.len() + 1),
        };

        let photo = Photo::new(image, title);
        let id = photo.id().clone();
        tracing::debug!("Adding photo {} ({})", photo.title(), photo.image());
        self.items.insert(0, photo);
        id
    }

    /// Remove the photo at `index`, keeping the cursor on the same logical photo.
    /// Returns `None` for an invalid index.
    pub fn delete_photo(&mut self, index: usize) -> Option<Photo> {
        if index >= self.items.len() {
            tracing::debug!("Ignoring delete for stale index {}", index);
            return None;
        }

        let removed = self.items.remove(index);
        self.cursor.on_removed(index);
        tracing::debug!("Deleted photo {} at {}", removed.id(), index);
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use async_trait::async_trait;

    struct CountingSource(usize);

    #[async_trait]
    impl PhotoSource for CountingSource {
        async fn load_photos(&self) -> Result<Vec<Photo>> {
            Ok((0..self.0)
                .map(|i| Photo::from_asset(format!("image{}", i), format!("P{}", i)))
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PhotoSource for FailingSource {
        async fn load_photos(&self) -> Result<Vec<Photo>> {
            Err(GalleryError::Source("index unavailable".into()))
        }
    }

    fn store_with(titles: &[&str]) -> GalleryStore {
        let mut store = GalleryStore::new(20);
        let photos = titles.iter().map(|t| Photo::from_asset(*t, *t)).collect();
        store.finish_load(Ok(photos)).unwrap();
        store
    }

    fn titles(store: &GalleryStore) -> Vec<&str> {
        store.items().iter().map(|p| p.title()).collect()
    }

    #[test]
    fn test_select_then_clear() {
        let mut store = store_with(&["A", "B", "C"]);
        let before = store.items().to_vec();

        store.select_photo(1).unwrap();
        assert_eq!(store.selected_photo().unwrap().title(), "B");
        store.clear_selection();

        assert_eq!(store.selected_index(), None);
        assert_eq!(store.items(), &before[..]);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut store = store_with(&["A", "B"]);
        let err = store.select_photo(2).unwrap_err();
        assert!(matches!(err, GalleryError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(2).unwrap();
        store.next_photo();
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(0).unwrap();
        store.previous_photo();
        assert_eq!(store.selected_index(), Some(2));
    }

    #[test]
    fn test_navigation_without_selection_is_noop() {
        let mut store = store_with(&["A", "B"]);
        store.next_photo();
        store.previous_photo();
        assert!(!store.toggle_favorite_selected());
        assert_eq!(store.selected_index(), None);
        assert!(store.items().iter().all(|p| !p.is_favorite()));
    }

    #[test]
    fn test_toggle_favorite_is_involution() {
        let mut store = store_with(&["A", "B", "C"]);
        for i in 0..3 {
            let original = store.items()[i].clone();
            assert!(store.toggle_favorite(i));
            assert_eq!(store.items()[i].is_favorite(), !original.is_favorite());
            assert!(store.toggle_favorite(i));
            assert_eq!(store.items()[i], original);
        }
    }

    #[test]
    fn test_toggle_favorite_selected() {
        let mut store = store_with(&["A", "B"]);
        store.select_photo(1).unwrap();
        assert!(store.toggle_favorite_selected());
        assert!(store.items()[1].is_favorite());
        assert!(!store.items()[0].is_favorite());
    }

    #[test]
    fn test_toggle_favorite_stale_index() {
        let mut store = store_with(&["A"]);
        assert!(!store.toggle_favorite(5));
        assert!(!store.items()[0].is_favorite());
    }

    #[test]
    fn test_delete_selected_closes_detail() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(1).unwrap();
        let deleted_id = store.items()[1].id().clone();

        let removed = store.delete_photo(1).unwrap();

        assert_eq!(removed.id(), &deleted_id);
        assert_eq!(store.selected_index(), None);
        assert_eq!(store.len(), 2);
        assert!(store.items().iter().all(|p| p.id() != &deleted_id));
    }

    #[test]
    fn test_delete_before_selection_tracks_photo() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.select_photo(3).unwrap();
        let tracked = store.items()[3].clone();

        store.delete_photo(1);

        assert_eq!(store.selected_index(), Some(2));
        assert_eq!(store.items()[2], tracked);
    }

    #[test]
    fn test_delete_first_with_middle_selected() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(1).unwrap();
        store.delete_photo(0);
        assert_eq!(titles(&store), vec!["B", "C"]);
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_delete_after_selection_keeps_index() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(0).unwrap();
        store.delete_photo(2);
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_delete_last_remaining_photo() {
        let mut store = store_with(&["A"]);
        store.select_photo(0).unwrap();
        store.delete_photo(0);
        assert!(store.is_empty());
        assert_eq!(store.selected_index(), None);
        store.next_photo();
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn test_delete_stale_index() {
        let mut store = store_with(&["A", "B"]);
        store.select_photo(1).unwrap();
        assert!(store.delete_photo(2).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn test_add_new_photo_prepends_with_default_title() {
        let mut store = store_with(&["A", "B"]);
        store.select_photo(1).unwrap();

        let id = store.add_new_photo(ImageRef::external("content://media/42"), Some(""));

        assert_eq!(titles(&store), vec!["Photo 3", "A", "B"]);
        assert_eq!(store.items()[0].id(), &id);
        assert!(!store.items()[0].is_favorite());
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn test_add_new_photo_keeps_title() {
        let mut store = GalleryStore::new(20);
        store.add_new_photo(ImageRef::external("file:///a.jpg"), Some("Holiday"));
        store.add_new_photo(ImageRef::external("file:///b.jpg"), None);
        assert_eq!(titles(&store), vec!["Photo 2", "Holiday"]);
    }

    #[tokio::test]
    async fn test_paged_load_replaces_items() {
        let source = CountingSource(25);
        let mut store = GalleryStore::new(20);

        assert!(!store.is_loading());
        assert_eq!(store.load(&source).await.unwrap(), 20);
        assert!(!store.is_loading());
        assert_eq!(store.items()[0].title(), "P0");

        assert_eq!(store.load_next_page(&source).await.unwrap(), 5);
        assert!(!store.is_loading());
        assert_eq!(store.current_page(), 1);
        assert_eq!(store.items()[0].title(), "P20");
        assert_eq!(store.items()[4].title(), "P24");

        assert_eq!(store.load_next_page(&source).await.unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_loading_flag_around_load() {
        let mut store = GalleryStore::new(20);
        store.begin_load();
        assert!(store.is_loading());
        assert!(store.snapshot().is_loading);
        store.finish_load(Ok(Vec::new())).unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_load_resets_loading() {
        let mut store = store_with(&["A", "B"]);
        store.select_photo(0).unwrap();

        let result = store.load(&FailingSource).await;

        assert!(matches!(result, Err(GalleryError::Source(_))));
        assert!(!store.is_loading());
        assert!(store.is_empty());
        assert_eq!(store.selected_index(), None);
    }

    #[tokio::test]
    async fn test_load_closes_detail_view() {
        let mut store = store_with(&["A", "B", "C"]);
        store.select_photo(2).unwrap();
        store.load(&CountingSource(1)).await.unwrap();
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn test_snapshot_selected_photo() {
        let mut store = store_with(&["A", "B"]);
        assert!(store.snapshot().selected_photo().is_none());
        store.select_photo(1).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.selected_index, Some(1));
        assert_eq!(snapshot.selected_photo().unwrap().title(), "B");
    }
}

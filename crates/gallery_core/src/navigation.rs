//! Detail-view cursor and page cursor

use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default number of photos per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Which photo, if any, is shown full-screen.
///
/// Every transition takes the current list length so an `Open` cursor
/// never points past the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetailCursor {
    /// Grid is showing, no detail view
    #[default]
    Closed,
    /// Detail view open on the photo at this index
    Open(usize),
}

impl DetailCursor {
    pub fn index(&self) -> Option<usize> {
        match self {
            DetailCursor::Closed => None,
            DetailCursor::Open(index) => Some(*index),
        }
    }

    /// Open the detail view on `index`
    pub fn select(&mut self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(GalleryError::IndexOutOfRange { index, len });
        }
        *self = DetailCursor::Open(index);
        Ok(())
    }

    /// Close the detail view
    pub fn clear(&mut self) {
        *self = DetailCursor::Closed;
    }

    /// Advance, wrapping from last to first
    pub fn next(&mut self, len: usize) {
        if let DetailCursor::Open(current) = *self {
            *self = if len == 0 {
                DetailCursor::Closed
            } else {
                DetailCursor::Open((current + 1) % len)
            };
        }
    }

    /// Retreat, wrapping from first to last
    pub fn previous(&mut self, len: usize) {
        if let DetailCursor::Open(current) = *self {
            *self = match len {
                0 => DetailCursor::Closed,
                _ if current == 0 || current >= len => DetailCursor::Open(len - 1),
                _ => DetailCursor::Open(current - 1),
            };
        }
    }

    /// Re-normalize after the entry at `removed` was deleted
    pub fn on_removed(&mut self, removed: usize) {
        if let DetailCursor::Open(current) = *self {
            if current == removed {
                *self = DetailCursor::Closed;
            } else if current > removed {
                *self = DetailCursor::Open(current - 1);
            }
        }
    }
}

/// Page arithmetic over the full source list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    page_size: usize,
    current_page: usize,
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Slice bounds of the current page within a list of `total` items.
    /// Empty when the page starts past the end.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = self.current_page.saturating_mul(self.page_size);
        if start >= total {
            return total..total;
        }
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_rejects_out_of_range() {
        let mut cursor = DetailCursor::Closed;
        assert!(matches!(
            cursor.select(3, 3),
            Err(GalleryError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(cursor, DetailCursor::Closed);

        cursor.select(2, 3).unwrap();
        assert_eq!(cursor.index(), Some(2));
    }

    #[test]
    fn test_next_wraps() {
        let mut cursor = DetailCursor::Open(2);
        cursor.next(3);
        assert_eq!(cursor, DetailCursor::Open(0));
    }

    #[test]
    fn test_previous_wraps() {
        let mut cursor = DetailCursor::Open(0);
        cursor.previous(3);
        assert_eq!(cursor, DetailCursor::Open(2));
        cursor.previous(3);
        assert_eq!(cursor, DetailCursor::Open(1));
    }

    #[test]
    fn test_closed_ignores_navigation() {
        let mut cursor = DetailCursor::Closed;
        cursor.next(5);
        cursor.previous(5);
        cursor.on_removed(0);
        assert_eq!(cursor, DetailCursor::Closed);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for len in 1..6 {
            for start in 0..len {
                let mut cursor = DetailCursor::Open(start);
                for _ in 0..len {
                    cursor.next(len);
                }
                assert_eq!(cursor, DetailCursor::Open(start));

                cursor.previous(len);
                cursor.next(len);
                assert_eq!(cursor, DetailCursor::Open(start));
            }
        }
    }

    #[test]
    fn test_on_removed() {
        let mut cursor = DetailCursor::Open(2);
        cursor.on_removed(3);
        assert_eq!(cursor, DetailCursor::Open(2));
        cursor.on_removed(0);
        assert_eq!(cursor, DetailCursor::Open(1));
        cursor.on_removed(1);
        assert_eq!(cursor, DetailCursor::Closed);
    }

    #[test]
    fn test_page_bounds() {
        let mut pages = PageCursor::new(20);
        assert_eq!(pages.bounds(25), 0..20);
        pages.advance();
        assert_eq!(pages.bounds(25), 20..25);
        pages.advance();
        assert_eq!(pages.bounds(25), 25..25);
        assert_eq!(PageCursor::new(20).bounds(0), 0..0);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(PageCursor::new(0).page_size(), 1);
    }
}

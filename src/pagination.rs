//! Page slices and previous/next page arithmetic.

use serde::Serialize;

/// Marker for "no such page in this direction".
pub const NO_PAGE: i64 = -1;

/// Zero-based neighbours of the current page, `NO_PAGE` where none exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjacentPages {
    pub previous: i64,
    pub next: i64,
}

impl AdjacentPages {
    pub fn has_previous(&self) -> bool {
        self.previous != NO_PAGE
    }

    pub fn has_next(&self) -> bool {
        self.next != NO_PAGE
    }
}

/// Compute the previous and next page numbers around `current_page`.
///
/// `current_page` is not checked against `total_pages`: an out-of-range page
/// still gets `current_page - 1` as its previous page.
pub fn compute_adjacent(current_page: u32, total_pages: u32) -> AdjacentPages {
    let current = i64::from(current_page);
    let total = i64::from(total_pages);

    let previous = if current > 0 { current - 1 } else { NO_PAGE };
    let next = if current + 1 < total {
        current + 1
    } else {
        NO_PAGE
    };

    AdjacentPages { previous, next }
}

/// An ordered slice of records plus the page metadata the store knew at query time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page number.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        Self {
            items,
            number,
            size,
            total_elements,
            total_pages: total_pages_for(total_elements, size),
        }
    }

    pub fn adjacent(&self) -> AdjacentPages {
        compute_adjacent(self.number, self.total_pages)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `ceil(total_elements / size)`; zero when either is zero.
pub fn total_pages_for(total_elements: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

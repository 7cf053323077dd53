//! Page math for list queries
//!
//! A list request arrives as raw `page` and `pageSize` strings. Those are
//! parsed and validated exactly once, up front, into a [`PageRequest`]; the
//! store is never consulted with unvalidated input. Invalid values are
//! rejected, never silently clamped.
//!
//! The derived values:
//!
//! - `offset = (page - 1) * page_size`
//! - `total_pages = ceil(total_items / page_size)`, so a collection of zero
//!   items reports zero pages
//!
//! A page past the end of the collection is not an error; it yields an empty
//! slice with the collection-wide totals intact.
//!
//! ```rust
//! use product_service::pagination::{total_pages, PageRequest};
//!
//! let request = PageRequest::parse(Some("3"), Some("5"), 5).unwrap();
//! assert_eq!(request.offset(), 10);
//! assert_eq!(total_pages(11, 5), 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A validated page request.
///
/// Both `page` and `page_size` are guaranteed to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Parse raw query values into a validated request.
    ///
    /// Absent values fall back to page 1 and `default_page_size`. Present
    /// values must parse as integers of at least 1; anything else fails with
    /// [`Error::InvalidParameter`] before any store call is made.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u32,
    ) -> Result<Self, Error> {
        let page = match page {
            None => 1,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&p| p >= 1)
                .ok_or_else(|| Error::invalid_parameter("invalid page parameter"))?,
        };

        let page_size = match page_size {
            None => default_page_size,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&s| s >= 1)
                .ok_or_else(|| Error::invalid_parameter("invalid pageSize parameter"))?,
        };

        Ok(Self { page, page_size })
    }

    /// Create a request from already-validated values.
    ///
    /// Fails with [`Error::InvalidParameter`] if either value is zero.
    pub fn new(page: u32, page_size: u32) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::invalid_parameter("invalid page parameter"));
        }
        if page_size < 1 {
            return Err(Error::invalid_parameter("invalid pageSize parameter"));
        }
        Ok(Self { page, page_size })
    }

    /// The 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// Calculate total pages, rounding up.
///
/// `page_size` is guaranteed non-zero by [`PageRequest`] validation, so no
/// division-by-zero path exists. Zero items yield zero pages.
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size);
    let pages = total_items.div_ceil(page_size);
    pages.min(u64::from(u32::MAX)) as u32
}

/// One page of a collection, with collection-wide totals and timing.
///
/// `total_items` counts the whole collection, not the returned slice, and
/// `total_pages` is derived from it. `start`/`finish` bracket the query and
/// `duration` is their difference, preformatted for the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page, in store order
    pub list: Vec<T>,
    /// Total item count across the whole collection
    pub total_items: u64,
    /// Total page count at this page size
    pub total_pages: u32,
    /// Echoed page number
    pub page: u32,
    /// Echoed page size
    pub page_size: u32,
    /// When the query started
    pub start: DateTime<Utc>,
    /// When the page was assembled
    pub finish: DateTime<Utc>,
    /// Elapsed time between start and finish
    pub duration: String,
}

impl<T> Page<T> {
    /// Assemble a page from a fetched slice and the collection total.
    ///
    /// `finish` is stamped at call time, so assemble the page as the last
    /// step of the operation.
    #[must_use]
    pub fn assemble(
        list: Vec<T>,
        total_items: u64,
        request: &PageRequest,
        start: DateTime<Utc>,
    ) -> Self {
        let finish = Utc::now();
        let duration = finish
            .signed_duration_since(start)
            .to_std()
            .unwrap_or_default();

        Self {
            list,
            total_items,
            total_pages: total_pages(total_items, request.page_size()),
            page: request.page(),
            page_size: request.page_size(),
            start,
            finish,
            duration: format!("{duration:?}"),
        }
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

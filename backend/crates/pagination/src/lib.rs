//! Pagination envelope primitives shared by Ruleboard backend endpoints.
//!
//! A paginated response nests a [`Page`] inside the standard response
//! envelope's `data` field. The page carries the item slice together with the
//! totals a client needs to walk the collection:
//!
//! ```json
//! { "list": [...], "total": 42, "page": 2, "page_size": 10, "total_pages": 5 }
//! ```
//!
//! `total_pages` is derived with truncating integer division plus a remainder
//! check rather than floating-point rounding, so the value is exact for the
//! full `i64` range of `total`.

use serde::{Deserialize, Serialize};

/// Default number of items per page when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound applied to client-supplied page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of results plus the counters describing the whole collection.
///
/// # Examples
/// ```
/// use pagination::Page;
///
/// let page = Page::new(vec!["a", "b"], 25, 2, 10);
/// assert_eq!(page.total_pages, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub list: Vec<T>,
    /// Total number of items across all pages.
    pub total: i64,
    /// 1-based index of this page.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of pages required to hold `total` items.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page, deriving `total_pages` from `total` and `page_size`.
    #[must_use]
    pub fn new(list: Vec<T>, total: i64, page: u32, page_size: u32) -> Self {
        Self {
            list,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Map the items of this page, keeping the counters unchanged.
    ///
    /// # Examples
    /// ```
    /// use pagination::Page;
    ///
    /// let lengths = Page::new(vec!["a", "bb"], 2, 1, 10).map(str::len);
    /// assert_eq!(lengths.list, vec![1, 2]);
    /// ```
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            list: self.list.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed to hold `total` items at `page_size` per page.
///
/// Non-positive totals and a zero page size both yield zero pages. Computed
/// with truncating division and a remainder check.
///
/// # Examples
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0, 10), 0);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(11, 10), 2);
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "the page count contract is truncating division plus a remainder check"
)]
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    let size = i64::from(page_size);
    if total <= 0 || size == 0 {
        return 0;
    }
    let mut pages = total / size;
    if total % size > 0 {
        pages += 1;
    }
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Raw pagination query parameters as sent by clients.
///
/// Both fields are optional on the wire; [`PageQuery::normalize`] applies the
/// defaults and bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// Requested 1-based page index.
    pub page: Option<u32>,
    /// Requested page size.
    pub page_size: Option<u32>,
}

/// Normalised pagination parameters ready for a repository query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index, at least 1.
    pub page: u32,
    /// Page size, between 1 and [`MAX_PAGE_SIZE`].
    pub page_size: u32,
}

impl PageQuery {
    /// Apply defaults and bounds to the raw query values.
    ///
    /// A missing or zero `page` becomes 1. A missing or zero `page_size`
    /// becomes [`DEFAULT_PAGE_SIZE`]; values above [`MAX_PAGE_SIZE`] are
    /// clamped.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageQuery, DEFAULT_PAGE_SIZE};
    ///
    /// let request = PageQuery::default().normalize();
    /// assert_eq!(request.page, 1);
    /// assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    /// ```
    #[must_use]
    pub fn normalize(self) -> PageRequest {
        let page = match self.page {
            Some(page) if page > 0 => page,
            _ => 1,
        };
        let page_size = match self.page_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };
        PageRequest { page, page_size }
    }
}

impl PageRequest {
    /// Number of items to skip for this page.
    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    /// Number of items to fetch for this page.
    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.page_size)
    }
}

//! Pagination primitives shared by every listing operation
//!
//! Out-of-range page numbers clamp to the last populated page instead of
//! returning an empty page; an empty table answers as page 1 with no rows.

/// A requested page. Both fields must be positive; non-positive requests are
/// rejected at the HTTP layer before a `Pageable` is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }
}

/// The effective window a clamped page request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Clamp a requested page against the total row count.
///
/// `max_page = ceil(total / size)`, floored at 1 so an empty table still
/// resolves to page 1 with offset 0.
pub fn clamp_page(pageable: Pageable, total: u64) -> PageWindow {
    debug_assert!(pageable.page >= 1, "page must be positive");
    debug_assert!(pageable.size >= 1, "page size must be positive");

    let max_page = total.div_ceil(pageable.size).max(1);
    let page = pageable.page.min(max_page);

    PageWindow {
        page,
        offset: (page - 1) * pageable.size,
        limit: pageable.size,
    }
}

/// One page of results. `page_size` reports the number of items actually
/// returned, which on the last page may be smaller than the requested size.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(page: u64, total: u64, content: Vec<T>) -> Self {
        Self {
            page,
            page_size: content.len() as u64,
            total,
            content,
        }
    }

    /// Project the page content into another shape, keeping the paging
    /// envelope intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            content: self.content.into_iter().map(f).collect(),
        }
    }
}

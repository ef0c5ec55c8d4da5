//! Page-number window and next/prev/jump controls.

use std::fmt;

use crate::error::{Result, ShopfloorError};
use crate::types::Pagination;

/// Pages on either side of the current page that are always shown.
pub const PAGE_WINDOW: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => write!(f, "…"),
        }
    }
}

/// First page, last page, and everything within [`PAGE_WINDOW`] of `current`,
/// with a single ellipsis standing in for each gap.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageMarker> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let low = current.saturating_sub(PAGE_WINDOW).max(1);
    let high = current.saturating_add(PAGE_WINDOW).min(total);

    let mut pages = vec![1];
    pages.extend(low..=high);
    pages.push(total);
    pages.sort_unstable();
    pages.dedup();

    let mut markers = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for page in pages {
        if let Some(p) = prev
            && page > p + 1
        {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        prev = Some(page);
    }
    markers
}

/// Navigation over the server-reported page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    total: u32,
}

impl Pager {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub fn from_pagination(pagination: &Pagination) -> Self {
        Self::new(pagination.page, pagination.pages)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Page after the current one; `None` on the last page.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    /// Page before the current one; `None` on the first page.
    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.current - 1)
    }

    pub fn jump(&self, page: u32) -> Result<u32> {
        if page == 0 || page > self.total {
            return Err(ShopfloorError::Validation(format!(
                "page must be between 1 and {}",
                self.total
            )));
        }
        Ok(page)
    }

    pub fn visible_pages(&self) -> Vec<PageMarker> {
        visible_pages(self.current, self.total)
    }
}

/// Render markers as `1 … 3 4 [5] 6 7 … 10`.
pub fn render_pages(markers: &[PageMarker], current: u32) -> String {
    markers
        .iter()
        .map(|m| match m {
            PageMarker::Page(n) if *n == current => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

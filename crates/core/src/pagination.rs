use serde::Serialize;
use std::ops::Range;

/// Number of articles per agent listing page
pub const PAGE_SIZE: usize = 6;

/// Resolved state of one listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page_number: usize,
    pub total_pages: usize,
    /// 1-based index of the first item shown, 0 when there are no items
    pub range_start: usize,
    /// 1-based index of the last item shown
    pub range_end: usize,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(skip)]
    bounds: (usize, usize),
}

impl PageWindow {
    /// Slice bounds into the full item list
    pub fn bounds(&self) -> Range<usize> {
        self.bounds.0..self.bounds.1
    }

    /// The items on this page. Empty for pages past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.bounds.1.min(items.len());
        let start = self.bounds.0.min(end);
        &items[start..end]
    }

    pub fn previous_page(&self) -> Option<usize> {
        self.has_previous.then(|| self.page_number - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next.then(|| self.page_number + 1)
    }
}

/// Number of listing pages for `total_items`. Always at least one, so an
/// empty agent still gets a single (empty) page.
pub fn total_pages(total_items: usize) -> usize {
    total_items.max(1).div_ceil(PAGE_SIZE).max(1)
}

/// Parse a page token. Missing, non-numeric, non-finite or < 1 tokens
/// resolve to page 1; fractional pages are floored.
pub fn parse_page_number(raw: Option<&str>) -> usize {
    let parsed = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok());

    match parsed {
        Some(value) if value.is_finite() && value >= 1.0 => value.floor() as usize,
        _ => 1,
    }
}

/// Map a requested page token and item count to a page window.
///
/// There is no upper clamp: a page past the last one yields an empty
/// window with `has_next == false`.
pub fn resolve_page(raw: Option<&str>, total_items: usize) -> PageWindow {
    let page_number = parse_page_number(raw);
    let total_pages = total_pages(total_items);

    let skip = (page_number - 1).saturating_mul(PAGE_SIZE);
    let start = skip.min(total_items);
    let end = skip.saturating_add(PAGE_SIZE).min(total_items);
    let window_len = end - start;

    PageWindow {
        page_number,
        total_pages,
        range_start: if total_items == 0 { 0 } else { skip.saturating_add(1) },
        range_end: skip.saturating_add(window_len).min(total_items),
        has_previous: page_number > 1,
        has_next: page_number < total_pages,
        bounds: (start, end),
    }
}

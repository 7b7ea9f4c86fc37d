//! Pagination window and page-bar construction.
//!
//! Everything in this module is pure: the calculator sanitizes any
//! (total, size, requested page) triple into a valid window, and the
//! bar builder renders that window into an ordered list of page links.

use serde::Serialize;

/// Page size applied when the client requests none (or an unusable one)
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Requested sizes at or below this floor fall back to the default
pub const MIN_PAGE_SIZE: i64 = 5;

/// Requested sizes above this ceiling are clamped down to it
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page counts at or below this render every page in the bar;
/// larger counts switch to the condensed first/last + window rendering
pub const PAGE_BAR_THRESHOLD: i64 = 7;

/// Pagination metadata calculated from the total result count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Total number of matching rows
    pub total_items: i64,
    /// Rows per page
    pub page_size: i64,
    /// Current page (0-indexed), always within [0, total_pages - 1]
    pub current_page: i64,
    /// Total number of pages, at least 1 even for an empty result set
    pub total_pages: i64,
    /// Offset for the SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Resolve the page size a client asked for against the floor/ceiling policy.
///
/// Missing or too-small values fall back to [`DEFAULT_PAGE_SIZE`]; values
/// above [`MAX_PAGE_SIZE`] clamp down to it.
pub fn effective_page_size(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        Some(n) if n > MIN_PAGE_SIZE => n,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Calculate the query window from total results and the requested page.
///
/// `requested_page` is 1-indexed as sent by clients; `None` or non-positive
/// values mean the first page. Out-of-bounds requests are clamped to the
/// last valid page, so this never fails.
///
/// # Examples
/// ```
/// use rowsearch::pagination::paginate;
///
/// // 250 total results at 100 per page = 3 pages
/// let w = paginate(250, 100, Some(2));
/// assert_eq!(w.current_page, 1);
/// assert_eq!(w.total_pages, 3);
/// assert_eq!(w.offset, 100);
///
/// // Requesting an out-of-bounds page gets clamped to the last page
/// let w = paginate(250, 100, Some(99));
/// assert_eq!(w.current_page, 2);
/// assert_eq!(w.offset, 200);
/// ```
pub fn paginate(total_items: i64, page_size: i64, requested_page: Option<i64>) -> PageWindow {
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);

    // 1-indexed from the client, 0-indexed internally
    let requested = match requested_page {
        Some(p) if p > 0 => p - 1,
        _ => 0,
    };
    let current_page = requested.min(total_pages - 1);
    let offset = current_page * page_size;

    PageWindow {
        total_items,
        page_size,
        current_page,
        total_pages,
        offset,
    }
}

/// One entry in the navigation page bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageLink {
    /// A clickable page number (1-indexed), flagged when it is the current page
    Page { value: i64, current: bool },
    /// A gap between the first/last pages and the window around the current one
    Ellipsis,
}

fn page(value: i64, current: bool) -> PageLink {
    PageLink::Page { value, current }
}

/// Render the page bar for a window of `total_pages` with `current_page`
/// (0-indexed) selected.
///
/// Up to [`PAGE_BAR_THRESHOLD`] pages every page is listed. Beyond that the
/// bar condenses to the first page, the last page, and up to three pages
/// around the current one, with ellipsis entries marking the gaps. The
/// branch order below replicates the UI convention exactly; the special
/// cases near the ends (no ellipsis when the window touches the last page,
/// page 2 shown alongside page 1 when it is current) are intentional.
pub fn page_links(total_pages: i64, current_page: i64) -> Vec<PageLink> {
    if total_pages <= PAGE_BAR_THRESHOLD {
        return (0..total_pages)
            .map(|i| page(i + 1, i == current_page))
            .collect();
    }

    let last = total_pages - 1;
    let mut links = Vec::new();

    // First page, plus page 2 when the first page is current
    if current_page != 0 {
        links.push(page(1, false));
    } else {
        links.push(page(1, true));
        links.push(page(2, false));
    }

    if current_page > 3 {
        links.push(PageLink::Ellipsis);
    }

    // Predecessor / current / successor window (collapses at either end)
    if current_page > 1 && current_page != last {
        links.push(page(current_page, false));
    }
    if current_page != 0 && current_page != last {
        links.push(page(current_page + 1, true));
    }
    if current_page > 0 && current_page != last {
        links.push(page(current_page + 2, false));
    }

    // Trailing gap and last page; skipped entirely when the successor above
    // already emitted the last page
    if current_page != total_pages - 2 {
        if current_page != last {
            links.push(PageLink::Ellipsis);
        }
        links.push(page(total_pages, current_page == last));
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_normal() {
        let w = paginate(250, 100, Some(2));
        assert_eq!(w.current_page, 1);
        assert_eq!(w.total_pages, 3);
        assert_eq!(w.offset, 100);
        assert_eq!(w.page_size, 100);
    }

    #[test]
    fn test_paginate_totals_formula() {
        assert_eq!(paginate(0, 20, None).total_pages, 1);
        assert_eq!(paginate(1, 20, None).total_pages, 1);
        assert_eq!(paginate(20, 20, None).total_pages, 1);
        assert_eq!(paginate(21, 20, None).total_pages, 2);
        assert_eq!(paginate(200, 100, None).total_pages, 2);
    }

    #[test]
    fn test_paginate_out_of_bounds_high() {
        let w = paginate(150, 100, Some(99));
        assert_eq!(w.current_page, 1); // Clamped to last page
        assert_eq!(w.offset, 100);
    }

    #[test]
    fn test_paginate_out_of_bounds_low() {
        let w = paginate(150, 100, Some(0));
        assert_eq!(w.current_page, 0);
        assert_eq!(w.offset, 0);
        let w = paginate(150, 100, Some(-3));
        assert_eq!(w.current_page, 0);
    }

    #[test]
    fn test_paginate_missing_page() {
        let w = paginate(150, 100, None);
        assert_eq!(w.current_page, 0);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn test_paginate_empty() {
        let w = paginate(0, 20, Some(4));
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.current_page, 0);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn test_paginate_idempotent() {
        let a = paginate(1234, 50, Some(7));
        let b = paginate(1234, 50, Some(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_page_size_policy() {
        assert_eq!(effective_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(effective_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(effective_page_size(Some(-10)), DEFAULT_PAGE_SIZE);
        // At the floor falls back; just above it is honored
        assert_eq!(effective_page_size(Some(5)), DEFAULT_PAGE_SIZE);
        assert_eq!(effective_page_size(Some(6)), 6);
        assert_eq!(effective_page_size(Some(50)), 50);
        assert_eq!(effective_page_size(Some(100)), 100);
        assert_eq!(effective_page_size(Some(5000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_bar_short_mode() {
        let links = page_links(5, 2);
        assert_eq!(
            links,
            vec![
                page(1, false),
                page(2, false),
                page(3, true),
                page(4, false),
                page(5, false),
            ]
        );
    }

    #[test]
    fn test_bar_single_page() {
        assert_eq!(page_links(1, 0), vec![page(1, true)]);
    }

    #[test]
    fn test_bar_condensed_middle() {
        // 0-indexed page 10 is 1-indexed page 11, flanked by 10 and 12
        let links = page_links(20, 10);
        assert_eq!(
            links,
            vec![
                page(1, false),
                PageLink::Ellipsis,
                page(10, false),
                page(11, true),
                page(12, false),
                PageLink::Ellipsis,
                page(20, false),
            ]
        );
    }

    #[test]
    fn test_bar_condensed_first_page() {
        let links = page_links(20, 0);
        assert_eq!(
            links,
            vec![
                page(1, true),
                page(2, false),
                PageLink::Ellipsis,
                page(20, false),
            ]
        );
    }

    #[test]
    fn test_bar_condensed_last_page() {
        let links = page_links(20, 19);
        assert_eq!(
            links,
            vec![page(1, false), PageLink::Ellipsis, page(20, true)]
        );
    }

    #[test]
    fn test_bar_condensed_second_page() {
        let links = page_links(20, 1);
        assert_eq!(
            links,
            vec![
                page(1, false),
                page(2, true),
                page(3, false),
                PageLink::Ellipsis,
                page(20, false),
            ]
        );
    }

    #[test]
    fn test_bar_condensed_near_end_suppresses_ellipsis() {
        // The successor entry is already the last page, so neither the
        // trailing ellipsis nor a duplicate last page is emitted
        let links = page_links(20, 18);
        assert_eq!(
            links,
            vec![
                page(1, false),
                PageLink::Ellipsis,
                page(18, false),
                page(19, true),
                page(20, false),
            ]
        );
    }

    #[test]
    fn test_bar_condensed_no_leading_ellipsis_until_page_five() {
        // current_page == 3 sits just inside the leading boundary
        let links = page_links(20, 3);
        assert_eq!(
            links,
            vec![
                page(1, false),
                page(3, false),
                page(4, true),
                page(5, false),
                PageLink::Ellipsis,
                page(20, false),
            ]
        );
        let links = page_links(20, 4);
        assert_eq!(links[1], PageLink::Ellipsis);
    }

    #[test]
    fn test_bar_current_marked_exactly_once() {
        for total_pages in 1..=25 {
            for current in 0..total_pages {
                let links = page_links(total_pages, current);
                let marked: Vec<i64> = links
                    .iter()
                    .filter_map(|l| match l {
                        PageLink::Page { value, current: true } => Some(*value),
                        _ => None,
                    })
                    .collect();
                assert_eq!(
                    marked,
                    vec![current + 1],
                    "total_pages={} current={}",
                    total_pages,
                    current
                );
            }
        }
    }

    #[test]
    fn test_bar_first_and_last_always_present() {
        for total_pages in 8..=25 {
            for current in 0..total_pages {
                let links = page_links(total_pages, current);
                let values: Vec<i64> = links
                    .iter()
                    .filter_map(|l| match l {
                        PageLink::Page { value, .. } => Some(*value),
                        PageLink::Ellipsis => None,
                    })
                    .collect();
                assert!(values.contains(&1));
                assert!(values.contains(&total_pages));
                // Strictly increasing, so no duplicated pages
                assert!(values.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_page_link_serialization() {
        let json = serde_json::to_value(page(3, true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "page", "value": 3, "current": true})
        );
        let json = serde_json::to_value(PageLink::Ellipsis).unwrap();
        assert_eq!(json, serde_json::json!({"type": "ellipsis"}));
    }
}

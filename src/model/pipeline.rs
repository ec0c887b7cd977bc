//! Filter, sort and paginate pipeline
//!
//! Every render derives the visible rows from the full dataset and the
//! current `ViewState`. Filtering does not depend on order, so rows are
//! filtered first and only the matches are sorted.

use super::row::Row;
use super::view::{SortConfig, SortDirection, ViewState};

/// Rows shown per page
pub const PAGE_SIZE: usize = 10;

/// Keep rows whose name contains `search`, ignoring case
pub fn filter_rows<'a>(rows: &[&'a Row], search: &str) -> Vec<&'a Row> {
    if search.is_empty() {
        return rows.to_vec();
    }
    let query = search.to_lowercase();
    rows.iter()
        .filter(|row| row.name.to_lowercase().contains(&query))
        .copied()
        .collect()
}

/// Order rows by the sort configuration
///
/// Stable: rows with equal keys keep their input order in both directions.
pub fn sort_rows<'a>(rows: &[&'a Row], sort: &SortConfig) -> Vec<&'a Row> {
    let mut sorted = rows.to_vec();
    if let Some(column) = sort.key {
        sorted.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    sorted
}

/// Number of pages for `len` items, never less than 1
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice out 1-based `page` and report the total page count
///
/// A page past the end (or page 0) yields an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let size = page_size.max(1);
    let total = total_pages(items.len(), size);
    if page == 0 {
        return (&items[..0], total);
    }
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = page.saturating_mul(size).min(items.len());
    (&items[start..end], total)
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<'a> {
    /// Rows on the current page
    pub rows: Vec<&'a Row>,
    /// Rows matching the search, across all pages
    pub matched: usize,
    /// Size of the whole dataset
    pub total_rows: usize,
    pub total_pages: usize,
    /// Page actually shown, after clamping
    pub current_page: usize,
}

/// Run the full pipeline for `state` over `rows`
pub fn snapshot<'a>(rows: &'a [Row], state: &ViewState) -> TableSnapshot<'a> {
    let all: Vec<&Row> = rows.iter().collect();
    let filtered = filter_rows(&all, &state.search_text);
    let sorted = sort_rows(&filtered, &state.sort);

    let total = total_pages(sorted.len(), PAGE_SIZE);
    let current_page = state.clamped(total).current_page;
    let (page, _) = paginate(&sorted, current_page, PAGE_SIZE);

    TableSnapshot {
        rows: page.to_vec(),
        matched: sorted.len(),
        total_rows: rows.len(),
        total_pages: total,
        current_page,
    }
}

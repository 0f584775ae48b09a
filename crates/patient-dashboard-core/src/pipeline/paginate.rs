//! Fixed-size pagination.

/// Number of pages needed for `count` rows. Zero rows means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Slice out a 1-based page. Out-of-range pages (including 0) are empty;
/// clamping is the caller's job.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

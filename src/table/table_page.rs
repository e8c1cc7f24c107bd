use serde::Serialize;

use super::types::PageSize;

/// One page of rows plus the numbers the pager shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_rows: usize,
}

/// Number of pages for `total` rows; never less than one
pub fn total_pages(total: usize, page_size: PageSize) -> u32 {
    let size = page_size.get() as usize;
    (total.div_ceil(size)).max(1) as u32
}

/// Slice out page `page` (1-based). Pages outside `1..=total_pages` come back empty.
pub fn paginate<T: Clone>(rows: &[T], page: u32, page_size: PageSize) -> Page<T> {
    let size = page_size.get() as usize;
    let total_pages = total_pages(rows.len(), page_size);

    let slice = if page == 0 {
        &[][..]
    } else {
        let start = (page as usize - 1).saturating_mul(size);
        let end = start.saturating_add(size).min(rows.len());
        if start >= rows.len() { &[][..] } else { &rows[start..end] }
    };

    Page {
        rows: slice.to_vec(),
        page,
        page_size: page_size.get(),
        total_pages,
        total_rows: rows.len(),
    }
}

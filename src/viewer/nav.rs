/// Page movement is refused at the document bounds; callers only ever see
/// in-range 1-based page numbers.
pub fn previous_page(current: usize, page_count: usize) -> Option<usize> {
    if page_count == 0 || current <= 1 {
        return None;
    }
    Some(current.min(page_count) - 1)
}

pub fn next_page(current: usize, page_count: usize) -> Option<usize> {
    if current >= page_count {
        return None;
    }
    Some(current.max(1) + 1)
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

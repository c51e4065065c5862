//! Splitting book lists into display pages

/// Number of books shown per page
pub const PAGE_SIZE: usize = 10;

/// Partition `items` into consecutive pages of at most [`PAGE_SIZE`] items.
///
/// Order is preserved and only the last page may be short. An empty input
/// yields no pages at all.
pub fn paginate<T>(items: Vec<T>) -> Vec<Vec<T>> {
    let mut pages = Vec::with_capacity(items.len().div_ceil(PAGE_SIZE));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        pages.push(items.by_ref().take(PAGE_SIZE).collect());
    }
    pages
}

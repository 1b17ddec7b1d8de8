/// Pagination position of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Next page to fetch, 1-based.
    pub next_page: u32,
    /// Pages the site reports for an entry list.
    pub page_count: Option<u32>,
    /// Items the site reports for a topic list.
    pub total_items: Option<usize>,
    exhausted: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            next_page: 1,
            page_count: None,
            total_items: None,
            exhausted: false,
        }
    }
}

impl Cursor {
    /// Whether another page can be fetched after `shown` items.
    pub fn has_more(&self, shown: usize) -> bool {
        if self.exhausted {
            return false;
        }
        if let Some(pages) = self.page_count {
            return self.next_page <= pages;
        }
        if let Some(total) = self.total_items {
            return shown < total;
        }
        false
    }

    /// Record a fetched page that yielded `fetched` items.
    pub fn advance(&mut self, fetched: usize) {
        self.next_page += 1;
        if fetched == 0 {
            self.exhausted = true;
        }
    }
}

/// Items shown to the user, append-only so that 1-based indices stay valid
/// across page loads.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    pub cursor: Cursor,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: Cursor::default(),
        }
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fetched page, at most `limit` items of it.
    ///
    /// Returns the number of items appended.
    pub fn push_page(&mut self, page: Vec<T>, limit: Option<usize>) -> usize {
        let fetched = page.len();
        let take = limit.unwrap_or(usize::MAX);
        let before = self.items.len();
        self.items.extend(page.into_iter().take(take));
        self.cursor.advance(fetched);
        self.items.len() - before
    }

    /// Item at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        index.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more(self.items.len())
    }

    /// Items from 1-based `start` onwards, paired with their index.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .skip(start.saturating_sub(1))
            .map(|(i, item)| (i + 1, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_stable_across_pages() {
        let mut listing = Listing::new();
        listing.push_page(vec!["a", "b", "c"], None);
        let before: Vec<_> = (1..=3).map(|i| *listing.get(i).unwrap()).collect();

        listing.push_page(vec!["d", "e"], None);
        let after: Vec<_> = (1..=3).map(|i| *listing.get(i).unwrap()).collect();

        assert_eq!(before, after);
        assert_eq!(listing.get(4), Some(&"d"));
        assert_eq!(listing.get(0), None);
        assert_eq!(listing.get(6), None);
    }

    #[test]
    fn test_limit_per_page() {
        let mut listing = Listing::new();
        assert_eq!(listing.push_page(vec![1, 2, 3, 4], Some(2)), 2);
        assert_eq!(listing.push_page(vec![5, 6, 7], Some(2)), 2);
        assert_eq!(listing.len(), 4);
        assert_eq!(listing.get(3), Some(&5));
        assert_eq!(listing.cursor.next_page, 3);
    }

    #[test]
    fn test_more_by_page_count() {
        let mut listing = Listing::new();
        listing.cursor.page_count = Some(2);
        assert!(listing.has_more());

        listing.push_page(vec![1], None);
        assert!(listing.has_more());
        listing.push_page(vec![2], None);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_more_by_total() {
        let mut listing = Listing::new();
        listing.push_page(vec![1, 2], None);
        listing.cursor.total_items = Some(3);
        assert!(listing.has_more());

        listing.push_page(vec![3], None);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_empty_page_exhausts() {
        let mut listing: Listing<u8> = Listing::new();
        listing.cursor.total_items = Some(10);
        listing.push_page(Vec::new(), None);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_iter_from() {
        let mut listing = Listing::new();
        listing.push_page(vec!["a", "b", "c"], None);
        let tail: Vec<_> = listing.iter_from(2).collect();
        assert_eq!(tail, vec![(2, &"b"), (3, &"c")]);
    }
}

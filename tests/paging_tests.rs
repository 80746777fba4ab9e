use std::cell::RefCell;

use pretty_assertions::assert_eq;

use casesheet::state::paging::{Page, PageLoader, PagedList};

/// Serves `total` numbers, recording each requested page.
struct Numbers {
    total: u32,
    requests: RefCell<Vec<(usize, usize)>>,
}

impl Numbers {
    fn new(total: u32) -> Self {
        Self {
            total,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl PageLoader<u32> for Numbers {
    async fn load_page(&self, page: usize, limit: usize) -> Option<Page<u32>> {
        self.requests.borrow_mut().push((page, limit));
        let start = ((page - 1) * limit) as u32;
        let end = (start + limit as u32).min(self.total);
        Some(Page {
            data: (start..end).collect(),
            has_next: end < self.total,
        })
    }
}

struct Offline;

impl PageLoader<u32> for Offline {
    async fn load_page(&self, _page: usize, _limit: usize) -> Option<Page<u32>> {
        None
    }
}

#[tokio::test]
async fn test_load_more_until_exhausted() {
    let loader = Numbers::new(5);
    let mut list = PagedList::new(2);

    assert!(list.load_more(&loader).await);
    assert_eq!(list.items(), &[0, 1]);
    assert!(list.has_more());

    assert!(list.load_more(&loader).await);
    assert!(list.load_more(&loader).await);
    assert_eq!(list.items(), &[0, 1, 2, 3, 4]);
    assert!(!list.has_more());

    assert!(!list.load_more(&loader).await);
    assert_eq!(*loader.requests.borrow(), vec![(1, 2), (2, 2), (3, 2)]);
}

#[tokio::test]
async fn test_failed_page_stops_loading() {
    let mut list: PagedList<u32> = PagedList::new(10);

    assert!(!list.load_more(&Offline).await);

    assert!(list.items().is_empty());
    assert!(!list.has_more());
    assert!(!list.is_loading());
}

#[test]
fn test_only_one_request_in_flight() {
    let mut list: PagedList<u32> = PagedList::new(3);

    assert_eq!(list.begin_load(), Some((1, 3)));
    assert!(list.is_loading());
    assert_eq!(list.begin_load(), None);

    list.finish_load(Some(Page {
        data: vec![7, 8, 9],
        has_next: true,
    }));
    assert!(!list.is_loading());
    assert_eq!(list.begin_load(), Some((2, 3)));
}

#[test]
fn test_reset_starts_over() {
    let mut list: PagedList<u32> = PagedList::new(3);
    list.begin_load();
    list.finish_load(Some(Page {
        data: vec![1],
        has_next: false,
    }));
    assert!(!list.has_more());

    list.reset();

    assert!(list.items().is_empty());
    assert!(list.has_more());
    assert_eq!(list.begin_load(), Some((1, 3)));
}

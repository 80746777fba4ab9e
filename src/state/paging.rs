use std::future::Future;

use tracing::warn;

/// One page returned by a list endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub has_next: bool,
}

/// Source of paged items. `None` means the request failed.
pub trait PageLoader<T> {
    fn load_page(&self, page: usize, limit: usize) -> impl Future<Output = Option<Page<T>>>;
}

/// Items loaded so far plus the flags a "load more" list needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    next_page: usize,
    limit: usize,
    loading: bool,
    has_more: bool,
}

impl<T> PagedList<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            limit: limit.max(1),
            loading: false,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Claims the next request, or `None` while one is running or the list
    /// is exhausted.
    pub fn begin_load(&mut self) -> Option<(usize, usize)> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some((self.next_page, self.limit))
    }

    pub fn finish_load(&mut self, page: Option<Page<T>>) {
        self.loading = false;
        match page {
            Some(page) => {
                self.items.extend(page.data);
                self.has_more = page.has_next;
                self.next_page += 1;
            }
            None => {
                warn!(page = self.next_page, "page load failed, no more pages will be requested");
                self.has_more = false;
            }
        }
    }

    pub async fn load_more<L: PageLoader<T>>(&mut self, loader: &L) -> bool {
        let Some((page, limit)) = self.begin_load() else {
            return false;
        };
        let result = loader.load_page(page, limit).await;
        let loaded = result.is_some();
        self.finish_load(result);
        loaded
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.loading = false;
        self.has_more = true;
    }
}

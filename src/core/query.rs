//! Paginated, optionally filtered reads over a [`PersonStore`].
//!
//! Page indices are 1-based. `total_pages` is computed from the count the page
//! is drawn from: the filtered count when a filter is given, the full count
//! otherwise.

use serde::{Deserialize, Serialize};

use crate::{filter::PersonFilter, person::Person};

use super::store::PersonStore;

/// Page size used when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Requested page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum records per page.
    pub page_size: usize,
    /// 1-based page number.
    pub page_index: usize,
}

impl PageRequest {
    /// Window of `page_size` records at 1-based `page_index`.
    pub fn new(page_size: usize, page_index: usize) -> Self {
        Self {
            page_size,
            page_index,
        }
    }

    fn skip(&self) -> usize {
        self.page_index.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 1)
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPage {
    /// Records on this page, in store order.
    pub people: Vec<Person>,
    /// Requested page size.
    pub page_size: usize,
    /// Requested page index.
    pub page_index: usize,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
    /// Number of records the page was drawn from.
    pub total_items: usize,
}

/// `ceil(count / page_size)`; zero when `page_size` is zero.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Filters the store (if `filter` is set) and slices out the requested page.
///
/// Out-of-range pages come back empty rather than failing.
pub fn query(store: &PersonStore, filter: Option<&PersonFilter>, page: PageRequest) -> PersonPage {
    let matching: Vec<&Person> = store
        .all()
        .iter()
        .filter(|p| filter.is_none_or(|f| f.matches(p)))
        .collect();
    let total_items = matching.len();

    let people = matching
        .into_iter()
        .skip(page.skip())
        .take(page.page_size)
        .cloned()
        .collect();

    PersonPage {
        people,
        page_size: page.page_size,
        page_index: page.page_index,
        total_pages: total_pages(total_items, page.page_size),
        total_items,
    }
}

/// The earliest-born record as a single-item page.
///
/// Ties keep the first record in store order. An empty store yields an empty
/// page with zero total pages.
pub fn oldest(store: &PersonStore) -> PersonPage {
    let mut oldest: Option<&Person> = None;
    for person in store.all() {
        if oldest.is_none_or(|o| person.date_of_birth < o.date_of_birth) {
            oldest = Some(person);
        }
    }

    let people: Vec<Person> = oldest.into_iter().cloned().collect();
    PersonPage {
        total_pages: people.len(),
        total_items: people.len(),
        people,
        page_size: 1,
        page_index: 1,
    }
}

/// Every full name in store order.
pub fn full_names(store: &PersonStore) -> Vec<String> {
    store.all().iter().map(Person::full_name).collect()
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, total_pages};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(20, 5), 4);
        assert_eq!(total_pages(20, 7), 3);
        assert_eq!(total_pages(21, 7), 3);
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(3, 0), 0);
    }

    #[test]
    fn page_zero_skips_nothing() {
        assert_eq!(PageRequest::new(5, 0).skip(), 0);
        assert_eq!(PageRequest::new(5, 1).skip(), 0);
        assert_eq!(PageRequest::new(5, 3).skip(), 10);
        assert_eq!(PageRequest::new(usize::MAX, 3).skip(), usize::MAX);
    }
}

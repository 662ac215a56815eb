//! Transaction data model and the paginated fetch accumulator.
//!
//! `PaginatedTransactions` owns the accumulated transaction list plus the page
//! cursor. Pages are fetched one at a time through the cache-aware fetch
//! capability and appended in arrival order; a failed fetch keeps prior state
//! untouched. Fetching is split into `begin_fetch`/`complete_fetch` so that at
//! most one request is in flight and a merge from before an invalidation is
//! dropped instead of resurrecting stale data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fetch::{CachedFetcher, Transport};

/// Endpoint key for the paginated transaction feed
pub const TRANSACTIONS_ENDPOINT: &str = "paginatedTransactions";

/// Endpoint key for the employee roster
pub const EMPLOYEES_ENDPOINT: &str = "employees";

/// An employee on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub merchant: String,
    pub date: NaiveDate,
    pub approved: bool,
    pub employee: Employee,
}

/// One page of results plus the cursor to the next page.
///
/// `next_page == None` signals there are no further pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub next_page: Option<u64>,
}

/// Query params for the paginated transaction feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

/// Permission to run one page fetch.
///
/// Issued by `begin_fetch` while no other fetch is in flight. Carries the page
/// to request and the accumulator generation at issue time; `complete_fetch`
/// drops the merge if the generation has moved on (invalidated meanwhile).
#[derive(Debug)]
pub struct FetchTicket {
    page: u64,
    generation: u64,
}

impl FetchTicket {
    pub fn page(&self) -> u64 {
        self.page
    }
}

/// Accumulator for incrementally fetched transaction pages.
#[derive(Debug, Default)]
pub struct PaginatedTransactions {
    accumulated: Option<PaginatedResponse<Transaction>>,
    loading: bool,
    generation: u64,
    employee_filter: Option<String>,
}

impl PaginatedTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated pages so far, `None` until the first successful fetch.
    pub fn data(&self) -> Option<&PaginatedResponse<Transaction>> {
        self.accumulated.as_ref()
    }

    /// Whether a page fetch is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether another page can still be fetched.
    pub fn has_more(&self) -> bool {
        match &self.accumulated {
            None => true,
            Some(resp) => resp.next_page.is_some(),
        }
    }

    /// Current employee filter forwarded with every page request.
    pub fn employee_filter(&self) -> Option<&str> {
        self.employee_filter.as_deref()
    }

    /// Set the employee filter. Callers invalidate separately; the filter does
    /// not touch already-accumulated pages by itself.
    pub fn set_employee_filter(&mut self, employee_id: Option<String>) {
        self.employee_filter = employee_id;
    }

    /// Start a page fetch: page `0` when nothing is accumulated yet, else the
    /// stored cursor.
    ///
    /// Returns `None` when a fetch is already in flight (single-flight) or the
    /// cursor is exhausted.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.loading {
            return None;
        }
        let page = match &self.accumulated {
            None => 0,
            Some(resp) => resp.next_page?,
        };
        self.loading = true;
        Some(FetchTicket {
            page,
            generation: self.generation,
        })
    }

    /// Merge the outcome of a page fetch.
    ///
    /// A `None` response (failed fetch) keeps prior state unchanged. A stale
    /// ticket (the accumulator was invalidated after `begin_fetch`) only
    /// clears the loading flag; its data is dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        response: Option<PaginatedResponse<Transaction>>,
    ) {
        self.loading = false;

        if ticket.generation != self.generation {
            crate::log::log(&format!(
                "dropping stale page {} (generation {} != {})",
                ticket.page, ticket.generation, self.generation
            ));
            return;
        }

        let Some(response) = response else {
            // Failed to fetch, keep whatever we already had
            return;
        };

        self.accumulated = Some(match self.accumulated.take() {
            // First page
            None => response,
            // Append the new page's data, cursor always from the newest response
            Some(mut previous) => {
                previous.data.extend(response.data);
                PaginatedResponse {
                    data: previous.data,
                    next_page: response.next_page,
                }
            }
        });
    }

    /// Fetch the next page (or the first page if none loaded yet) and merge it.
    pub async fn fetch_all<T: Transport>(&mut self, fetcher: &CachedFetcher<T>) {
        let Some(ticket) = self.begin_fetch() else {
            return;
        };
        let params = TransactionQuery {
            page: ticket.page(),
            employee_id: self.employee_filter.clone(),
        };
        let response = fetcher
            .fetch_with_cache::<PaginatedResponse<Transaction>, _>(TRANSACTIONS_ENDPOINT, &params)
            .await;
        self.complete_fetch(ticket, response);
    }

    /// Reset accumulated state to empty. Does not cancel an in-flight fetch;
    /// the generation bump makes its eventual merge a no-op.
    pub fn invalidate_data(&mut self) {
        self.accumulated = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_uppercase(),
        }
    }

    fn tx(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: 12.5,
            merchant: "Acme".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            approved: false,
            employee: employee("e1"),
        }
    }

    fn page(ids: &[&str], next_page: Option<u64>) -> PaginatedResponse<Transaction> {
        PaginatedResponse {
            data: ids.iter().map(|id| tx(id)).collect(),
            next_page,
        }
    }

    #[test]
    fn test_first_page_replaces_empty_state() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        assert_eq!(ticket.page(), 0);
        acc.complete_fetch(ticket, Some(page(&["a", "b"], Some(1))));

        let data = acc.data().unwrap();
        assert_eq!(data.data.len(), 2);
        assert_eq!(data.next_page, Some(1));
    }

    #[test]
    fn test_sequential_pages_concatenate_in_order() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&["a", "b"], Some(1))));

        let ticket = acc.begin_fetch().unwrap();
        assert_eq!(ticket.page(), 1);
        acc.complete_fetch(ticket, Some(page(&["c"], None)));

        let data = acc.data().unwrap();
        let ids: Vec<&str> = data.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(data.next_page, None);
        assert!(!acc.has_more());
    }

    #[test]
    fn test_failed_fetch_keeps_prior_state() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&["a", "b"], Some(1))));
        let before = acc.data().unwrap().clone();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, None);

        assert_eq!(acc.data().unwrap(), &before);
        assert!(!acc.loading());
    }

    #[test]
    fn test_invalidate_resets_state() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&["a"], Some(1))));
        assert!(acc.data().is_some());

        acc.invalidate_data();
        assert!(acc.data().is_none());

        // Next fetch starts over at page 0
        let ticket = acc.begin_fetch().unwrap();
        assert_eq!(ticket.page(), 0);
    }

    #[test]
    fn test_stale_merge_dropped_after_invalidate() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.invalidate_data();
        acc.complete_fetch(ticket, Some(page(&["stale"], Some(9))));

        assert!(acc.data().is_none());
        assert!(!acc.loading());
    }

    #[test]
    fn test_single_flight_rejects_second_begin() {
        let mut acc = PaginatedTransactions::new();

        let first = acc.begin_fetch();
        assert!(first.is_some());
        assert!(acc.begin_fetch().is_none());

        acc.complete_fetch(first.unwrap(), Some(page(&["a"], Some(1))));
        assert!(acc.begin_fetch().is_some());
    }

    #[test]
    fn test_exhausted_cursor_is_a_noop() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&["a"], None)));

        assert!(acc.begin_fetch().is_none());
        assert!(!acc.loading());
    }

    #[test]
    fn test_cursor_taken_from_newest_response() {
        let mut acc = PaginatedTransactions::new();

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&["a"], Some(1))));

        let ticket = acc.begin_fetch().unwrap();
        acc.complete_fetch(ticket, Some(page(&[], Some(2))));

        assert_eq!(acc.data().unwrap().next_page, Some(2));
    }
}

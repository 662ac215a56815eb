//! Local demo transport.
//!
//! Serves a deterministic, seeded transaction feed and employee roster through
//! the `Transport` seam, so the whole fetch path (cache, pagination, filters)
//! runs without any network.

use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::fetch::Transport;
use crate::transactions::{
    EMPLOYEES_ENDPOINT, Employee, PaginatedResponse, TRANSACTIONS_ENDPOINT, Transaction,
    TransactionQuery,
};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Radia", "Ken", "Frances", "Dennis",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Perlman", "Thompson",
    "Allen", "Ritchie",
];

const MERCHANTS: &[&str] = &[
    "Skyline Catering",
    "Transit Authority",
    "Cloud Hosting Co",
    "Office Depot",
    "Jet Set Travel",
    "Corner Coffee",
    "Print Works",
    "City Parking",
];

/// In-process API serving the demo data
pub struct LocalApi {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
    page_size: usize,
}

impl LocalApi {
    pub fn new(config: &Config) -> Self {
        let mut rng = Lcg::new(config.seed());

        let employees: Vec<Employee> = (0..config.employee_count())
            .map(|i| Employee {
                id: format!("emp-{}", i + 1),
                first_name: FIRST_NAMES[i % FIRST_NAMES.len()].to_string(),
                last_name: LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()].to_string(),
            })
            .collect();

        let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid base date");
        let transactions: Vec<Transaction> = (0..config.transaction_count())
            .map(|i| {
                let employee = employees[(rng.next() as usize) % employees.len()].clone();
                Transaction {
                    id: format!("txn-{:04}", i + 1),
                    amount: (rng.next() % 50_000) as f64 / 100.0,
                    merchant: MERCHANTS[(rng.next() as usize) % MERCHANTS.len()].to_string(),
                    date: base_date + Days::new((rng.next() % 365) as u64),
                    approved: rng.next() % 3 != 0,
                    employee,
                }
            })
            .collect();

        Self {
            employees,
            transactions,
            page_size: config.page_size(),
        }
    }

    fn paginated(&self, params: &Value) -> FetchResult<Value> {
        let query: TransactionQuery = serde_json::from_value(params.clone())
            .map_err(|e| FetchError::InvalidParams(e.to_string()))?;

        let filtered: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| match &query.employee_id {
                Some(id) => &t.employee.id == id,
                None => true,
            })
            .collect();

        let start = (query.page as usize).saturating_mul(self.page_size);
        let end = (start + self.page_size).min(filtered.len());
        let data: Vec<Transaction> = filtered
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .map(|t| (*t).clone())
            .collect();

        let next_page = if end < filtered.len() {
            Some(query.page + 1)
        } else {
            None
        };

        let response = PaginatedResponse { data, next_page };
        serde_json::to_value(response).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl Transport for LocalApi {
    async fn request(&self, endpoint: &str, params: &Value) -> FetchResult<Value> {
        match endpoint {
            TRANSACTIONS_ENDPOINT => self.paginated(params),
            EMPLOYEES_ENDPOINT => serde_json::to_value(&self.employees)
                .map_err(|e| FetchError::Decode(e.to_string())),
            other => Err(FetchError::UnknownEndpoint(other.to_string())),
        }
    }
}

/// Small deterministic generator for the demo feed
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        // Avoid the all-zeros fixed point
        Self(seed.wrapping_mul(2) | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

//! Services module
//!
//! Contains the data services backing the UI: the local demo transport that
//! serves the employee roster and the paginated transaction feed.

mod local_api;

pub use local_api::LocalApi;

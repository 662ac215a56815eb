//! UI components.

mod select;
mod transactions;

pub use select::render_dropdown;
pub use transactions::render_transactions;

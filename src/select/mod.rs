//! Positioned select widget
//!
//! A generic, searchable single-select control: the widget owns the open/close
//! state machine and popup position; list navigation is delegated to a
//! swappable combobox provider.

mod position;
mod provider;
mod scroll;
mod state;

pub use position::{DropdownPosition, dropdown_position};
pub use provider::{Combobox, ListCombobox};
pub use scroll::{ScrollDebouncer, ScrollRegistry, SubscriptionId};
pub use state::{DropdownContent, InputSelect, ParsedItem, RowView};

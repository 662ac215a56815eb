//! Application state.

use ratatui::layout::Rect;

use crate::select::{InputSelect, ParsedItem, ScrollRegistry};
use crate::transactions::{Employee, PaginatedTransactions};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,       // Navigating the transaction list
    FilterSelect, // Employee filter popup open
}

/// Item type of the employee filter select
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeFilter {
    All,
    Employee(Employee),
}

impl EmployeeFilter {
    /// The employee id forwarded to the transaction feed, `None` for all.
    pub fn employee_id(&self) -> Option<String> {
        match self {
            EmployeeFilter::All => None,
            EmployeeFilter::Employee(e) => Some(e.id.clone()),
        }
    }
}

/// Projection handed to the select widget.
pub fn parse_employee_filter(filter: &EmployeeFilter) -> ParsedItem {
    match filter {
        EmployeeFilter::All => ParsedItem {
            value: "all".to_string(),
            label: "All employees".to_string(),
        },
        EmployeeFilter::Employee(e) => ParsedItem {
            value: e.id.clone(),
            label: e.full_name(),
        },
    }
}

pub struct App {
    pub input_mode: InputMode,
    pub employee_select: InputSelect<EmployeeFilter>,
    pub transactions: PaginatedTransactions,
    pub scroll_registry: ScrollRegistry,
    pub list_selected: usize,
    spinner_frame: usize,
}

impl App {
    pub fn new() -> Self {
        let mut employee_select = InputSelect::new(
            "Filter by employee",
            "Loading employees",
            parse_employee_filter,
        )
        .with_default(EmployeeFilter::All);
        // Loading until the roster arrives
        employee_select.set_loading(true);

        Self {
            input_mode: InputMode::Normal,
            employee_select,
            transactions: PaginatedTransactions::new(),
            scroll_registry: ScrollRegistry::new(),
            list_selected: 0,
            spinner_frame: 0,
        }
    }

    /// Install the fetched employee roster as filter choices.
    pub fn set_employees(&mut self, employees: Vec<Employee>) {
        let mut items = vec![EmployeeFilter::All];
        items.extend(employees.into_iter().map(EmployeeFilter::Employee));
        self.employee_select.set_items(items);
        self.employee_select.set_loading(false);
    }

    pub fn toggle_filter(&mut self, trigger: Option<Rect>) {
        self.employee_select
            .toggle(trigger, &mut self.scroll_registry);
        self.sync_mode();
    }

    pub fn close_filter(&mut self) {
        self.employee_select.close(&mut self.scroll_registry);
        self.sync_mode();
    }

    /// Confirm the highlighted filter choice.
    ///
    /// A null selection changes nothing. A real selection swaps the feed
    /// filter and invalidates the accumulated pages; the caller triggers the
    /// fresh first-page fetch.
    pub fn confirm_filter(&mut self) -> Option<EmployeeFilter> {
        let selected = self.employee_select.confirm(&mut self.scroll_registry);
        self.sync_mode();

        if let Some(filter) = &selected {
            self.transactions.set_employee_filter(filter.employee_id());
            self.transactions.invalidate_data();
            self.list_selected = 0;
        }
        selected
    }

    pub fn next_row(&mut self) {
        let len = self.loaded_len();
        if len > 0 && self.list_selected + 1 < len {
            self.list_selected += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        if delta > 0 {
            for _ in 0..delta {
                self.next_row();
            }
        } else {
            for _ in 0..delta.abs() {
                self.prev_row();
            }
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    fn loaded_len(&self) -> usize {
        self.transactions.data().map(|d| d.data.len()).unwrap_or(0)
    }

    fn sync_mode(&mut self) {
        self.input_mode = if self.employee_select.is_open() {
            InputMode::FilterSelect
        } else {
            InputMode::Normal
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: name.to_string(),
            last_name: "Doe".to_string(),
        }
    }

    fn app_with_roster() -> App {
        let mut app = App::new();
        app.set_employees(vec![employee("e1", "Jane"), employee("e2", "John")]);
        app
    }

    fn trigger() -> Option<Rect> {
        Some(Rect::new(0, 2, 40, 1))
    }

    #[test]
    fn test_mode_follows_popup_state() {
        let mut app = app_with_roster();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.toggle_filter(trigger());
        assert_eq!(app.input_mode, InputMode::FilterSelect);

        app.close_filter();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_confirming_employee_swaps_filter_and_invalidates() {
        let mut app = app_with_roster();
        app.toggle_filter(trigger());
        app.employee_select.highlight_next(); // All employees
        app.employee_select.highlight_next(); // Jane

        let selected = app.confirm_filter();

        assert_eq!(
            selected,
            Some(EmployeeFilter::Employee(employee("e1", "Jane")))
        );
        assert_eq!(app.transactions.employee_filter(), Some("e1"));
        assert!(app.transactions.data().is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_null_confirmation_changes_nothing() {
        let mut app = app_with_roster();
        app.toggle_filter(trigger());

        let selected = app.confirm_filter();

        assert!(selected.is_none());
        assert_eq!(app.transactions.employee_filter(), None);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_all_employees_clears_the_filter() {
        let mut app = app_with_roster();
        app.toggle_filter(trigger());
        app.employee_select.highlight_next();
        app.employee_select.highlight_next();
        app.confirm_filter();

        app.toggle_filter(trigger());
        app.employee_select.highlight_next(); // All employees
        let selected = app.confirm_filter();

        assert_eq!(selected, Some(EmployeeFilter::All));
        assert_eq!(app.transactions.employee_filter(), None);
    }
}

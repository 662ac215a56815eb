//! Select widget state.
//!
//! `InputSelect` owns the open/closed state machine, the popup position, the
//! typed query, and the confirmed selection. Opening attaches a scroll
//! subscription and recomputes the popup position; closing detaches it.
//! Navigation and selection policy live in the combobox provider.

use ratatui::layout::Rect;

use super::position::{DropdownPosition, dropdown_position};
use super::provider::{Combobox, ListCombobox};
use super::scroll::{ScrollRegistry, SubscriptionId};

/// Projection of a caller item to a comparable value and a display label.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub value: String,
    pub label: String,
}

/// One visible row of the open popup.
#[derive(Debug, PartialEq)]
pub struct RowView<'a, T> {
    pub item: &'a T,
    pub label: String,
    pub highlighted: bool,
    pub selected: bool,
}

/// What the popup shows, in priority order.
#[derive(Debug, PartialEq)]
pub enum DropdownContent<'a, T> {
    /// Popup is closed, render nothing
    Hidden,
    /// Single loading row with the caller's label
    Loading(String),
    /// Single "No items" row
    Empty,
    /// One row per (filtered) item
    Items(Vec<RowView<'a, T>>),
}

/// A searchable single-select with a positioned popup.
pub struct InputSelect<T, C: Combobox = ListCombobox> {
    label: String,
    loading_label: String,
    items: Vec<T>,
    parse_item: fn(&T) -> ParsedItem,
    selected_value: Option<T>,
    is_open: bool,
    position: DropdownPosition,
    query: String,
    query_cursor: usize,
    /// Indices into `items` matching the current query
    filtered: Vec<usize>,
    loading: bool,
    provider: C,
    subscription: Option<SubscriptionId>,
}

impl<T: Clone> InputSelect<T> {
    pub fn new(label: &str, loading_label: &str, parse_item: fn(&T) -> ParsedItem) -> Self {
        Self::with_provider(label, loading_label, parse_item, ListCombobox::new())
    }
}

impl<T: Clone, C: Combobox> InputSelect<T, C> {
    pub fn with_provider(
        label: &str,
        loading_label: &str,
        parse_item: fn(&T) -> ParsedItem,
        provider: C,
    ) -> Self {
        Self {
            label: label.to_string(),
            loading_label: loading_label.to_string(),
            items: vec![],
            parse_item,
            selected_value: None,
            is_open: false,
            position: DropdownPosition::default(),
            query: String::new(),
            query_cursor: 0,
            filtered: vec![],
            loading: false,
            provider,
            subscription: None,
        }
    }

    /// Preselect a default value without notifying anyone.
    pub fn with_default(mut self, value: T) -> Self {
        self.selected_value = Some(value);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn position(&self) -> DropdownPosition {
        self.position
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn query_cursor(&self) -> usize {
        self.query_cursor
    }

    pub fn selected_value(&self) -> Option<&T> {
        self.selected_value.as_ref()
    }

    /// What the trigger line displays: the typed query while searching,
    /// otherwise the selected item's label.
    pub fn input_value(&self) -> String {
        if !self.query.is_empty() {
            return self.query.clone();
        }
        self.selected_value
            .as_ref()
            .map(|v| (self.parse_item)(v).label)
            .unwrap_or_default()
    }

    /// Replace the item list, keeping query and selection.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    /// Trigger click: recompute the popup position from the trigger rect,
    /// then delegate the toggle to the provider.
    pub fn toggle(&mut self, trigger: Option<Rect>, registry: &mut ScrollRegistry) {
        self.position = dropdown_position(trigger);
        self.provider.toggle();
        self.sync_open(registry);
    }

    /// Close the popup (outside click, escape, unmount).
    pub fn close(&mut self, registry: &mut ScrollRegistry) {
        self.provider.dismiss();
        self.sync_open(registry);
    }

    /// Reposition while open. No-op unless the scroll subscription is live.
    pub fn handle_scroll(&mut self, trigger: Option<Rect>) {
        if self.subscription.is_some() {
            self.position = dropdown_position(trigger);
        }
    }

    pub fn highlight_next(&mut self) {
        self.provider.highlight_next();
    }

    pub fn highlight_prev(&mut self) {
        self.provider.highlight_prev();
    }

    /// Confirm the highlighted row.
    ///
    /// A null selection (nothing highlighted) is ignored: no selection change
    /// and `None` returned, so the consumer is never notified. A real
    /// selection updates `selected_value` and hands the item back.
    pub fn confirm(&mut self, registry: &mut ScrollRegistry) -> Option<T> {
        let index = self.provider.confirm();
        // Resolve the index against the current filter view first: the close
        // transition below resets the query and refilters.
        let item = index
            .and_then(|i| self.filtered.get(i))
            .map(|&i| self.items[i].clone());
        self.sync_open(registry);

        let item = item?;
        self.selected_value = Some(item.clone());
        Some(item)
    }

    pub fn input_char(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
        self.refilter();
    }

    pub fn input_backspace(&mut self) {
        if self.query_cursor == 0 {
            return;
        }
        let prev = floor_char_boundary(&self.query, self.query_cursor - 1);
        self.query.remove(prev);
        self.query_cursor = prev;
        self.refilter();
    }

    /// Rows the popup would render, by priority: hidden, loading, empty,
    /// items. Highlight comes from the provider; the selected flag compares
    /// projected values.
    pub fn dropdown_content(&self) -> DropdownContent<'_, T> {
        if !self.is_open {
            return DropdownContent::Hidden;
        }
        if self.loading {
            return DropdownContent::Loading(format!("{}…", self.loading_label));
        }
        if self.filtered.is_empty() {
            return DropdownContent::Empty;
        }

        let selected_value = self.selected_value.as_ref().map(|v| (self.parse_item)(v).value);
        let highlighted = self.provider.highlighted_index();

        let rows = self
            .filtered
            .iter()
            .enumerate()
            .map(|(row, &index)| {
                let item = &self.items[index];
                let parsed = (self.parse_item)(item);
                RowView {
                    item,
                    selected: selected_value.as_deref() == Some(parsed.value.as_str()),
                    highlighted: highlighted == Some(row),
                    label: parsed.label,
                }
            })
            .collect();
        DropdownContent::Items(rows)
    }

    fn refilter(&mut self) {
        let query = self.query.to_lowercase();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                query.is_empty() || (self.parse_item)(item).label.to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect();
        self.provider.set_item_count(self.filtered.len());
    }

    /// Reconcile our open flag with the provider's, running the transition
    /// side effects: closed→open subscribes to scroll events, open→closed
    /// unsubscribes and resets the query.
    fn sync_open(&mut self, registry: &mut ScrollRegistry) {
        let open = self.provider.is_open();
        if open == self.is_open {
            return;
        }
        self.is_open = open;

        if open {
            if self.subscription.is_none() {
                self.subscription = Some(registry.subscribe());
            }
        } else {
            if let Some(id) = self.subscription.take() {
                registry.unsubscribe(id);
            }
            self.query.clear();
            self.query_cursor = 0;
            self.refilter();
        }
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        id: &'static str,
        name: &'static str,
    }

    fn parse_fruit(fruit: &Fruit) -> ParsedItem {
        ParsedItem {
            value: fruit.id.to_string(),
            label: fruit.name.to_string(),
        }
    }

    fn fruits() -> Vec<Fruit> {
        vec![
            Fruit { id: "1", name: "Apple" },
            Fruit { id: "2", name: "Banana" },
            Fruit { id: "3", name: "Cherry" },
        ]
    }

    fn select_with_items() -> InputSelect<Fruit> {
        let mut select = InputSelect::new("Fruit", "Loading fruit", parse_fruit);
        select.set_items(fruits());
        select
    }

    fn trigger() -> Option<Rect> {
        Some(Rect::new(2, 1, 20, 2))
    }

    #[test]
    fn test_toggle_opens_and_positions_popup() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();

        select.toggle(trigger(), &mut registry);

        assert!(select.is_open());
        assert_eq!(select.position(), DropdownPosition { top: 3, left: 2 });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_null_selection_is_ignored() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        // Nothing highlighted: confirm is a null selection
        let result = select.confirm(&mut registry);

        assert!(result.is_none());
        assert!(select.selected_value().is_none());
        assert!(!select.is_open());
    }

    #[test]
    fn test_confirm_updates_selection_and_returns_item() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        select.highlight_next();
        select.highlight_next();
        let result = select.confirm(&mut registry);

        assert_eq!(result.as_ref().map(|f| f.id), Some("2"));
        assert_eq!(select.selected_value().map(|f| f.id), Some("2"));
        assert_eq!(select.input_value(), "Banana");
    }

    #[test]
    fn test_scroll_subscription_returns_to_baseline() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        let baseline = registry.len();

        for _ in 0..4 {
            select.toggle(trigger(), &mut registry);
            assert_eq!(registry.len(), baseline + 1);
            select.close(&mut registry);
            assert_eq!(registry.len(), baseline);
        }
    }

    #[test]
    fn test_scroll_repositions_only_while_open() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        select.handle_scroll(Some(Rect::new(2, 5, 20, 2)));
        assert_eq!(select.position(), DropdownPosition { top: 7, left: 2 });

        select.close(&mut registry);
        select.handle_scroll(Some(Rect::new(2, 9, 20, 2)));
        assert_eq!(select.position(), DropdownPosition { top: 7, left: 2 });
    }

    #[test]
    fn test_missing_trigger_defaults_position_to_origin() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();

        select.toggle(None, &mut registry);
        assert_eq!(select.position(), DropdownPosition { top: 0, left: 0 });
    }

    #[test]
    fn test_closed_popup_renders_nothing() {
        let select = select_with_items();
        assert_eq!(select.dropdown_content(), DropdownContent::Hidden);
    }

    #[test]
    fn test_loading_renders_single_loading_row() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.set_loading(true);
        select.toggle(trigger(), &mut registry);

        assert_eq!(
            select.dropdown_content(),
            DropdownContent::Loading("Loading fruit…".to_string())
        );
    }

    #[test]
    fn test_empty_items_render_no_items_row() {
        let mut select: InputSelect<Fruit> = InputSelect::new("Fruit", "Loading fruit", parse_fruit);
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        assert_eq!(select.dropdown_content(), DropdownContent::Empty);
    }

    #[test]
    fn test_rows_carry_highlight_and_selected_flags() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);
        select.highlight_next();
        select.confirm(&mut registry); // selects Apple

        select.toggle(trigger(), &mut registry);
        select.highlight_next();
        select.highlight_next(); // highlight Banana

        match select.dropdown_content() {
            DropdownContent::Items(rows) => {
                assert_eq!(rows.len(), 3);
                assert!(rows[0].selected && !rows[0].highlighted);
                assert!(!rows[1].selected && rows[1].highlighted);
                assert_eq!(rows[2].label, "Cherry");
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_confirm_with_active_query_selects_filtered_row() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        select.input_char('a');
        select.input_char('n');
        select.highlight_next(); // Banana, the only match

        let result = select.confirm(&mut registry);

        assert_eq!(result.as_ref().map(|f| f.name), Some("Banana"));
        assert_eq!(select.selected_value().map(|f| f.name), Some("Banana"));
        assert!(!select.is_open());
        assert_eq!(select.query(), "");
    }

    #[test]
    fn test_query_filters_rows_and_resets_on_close() {
        let mut select = select_with_items();
        let mut registry = ScrollRegistry::new();
        select.toggle(trigger(), &mut registry);

        select.input_char('a');
        select.input_char('n');
        assert_eq!(select.input_value(), "an");

        match select.dropdown_content() {
            DropdownContent::Items(rows) => {
                let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
                assert_eq!(labels, vec!["Banana"]);
            }
            other => panic!("expected items, got {:?}", other),
        }

        select.input_backspace();
        select.input_backspace();
        select.input_char('z');
        assert_eq!(select.dropdown_content(), DropdownContent::Empty);

        select.close(&mut registry);
        assert_eq!(select.query(), "");
    }
}

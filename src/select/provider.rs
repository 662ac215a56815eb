//! Combobox behavior provider.
//!
//! The select widget delegates open state, highlight, and selection policy to
//! this capability trait, so any concrete provider can be swapped in behind
//! it. Default navigation wraps around the item list.

/// Capability interface over combobox behavior.
///
/// Implementors supply the primitive state accessors; navigation and the
/// open/close/confirm policy come as default implementations.
pub trait Combobox {
    /// Whether the popup is open
    fn is_open(&self) -> bool;

    /// Set the open state
    fn set_open(&mut self, open: bool);

    /// Number of rows currently navigable
    fn item_count(&self) -> usize;

    /// Index of the highlighted row, if any
    fn highlighted_index(&self) -> Option<usize>;

    /// Set the highlighted row
    fn set_highlighted_index(&mut self, index: Option<usize>);

    /// Update the navigable row count (the widget calls this when its
    /// filtered item list changes)
    fn set_item_count(&mut self, count: usize);

    /// Toggle the popup open/closed. Opening starts with no highlight;
    /// closing clears it.
    fn toggle(&mut self) {
        if self.is_open() {
            self.dismiss();
        } else {
            self.set_open(true);
        }
    }

    /// Close the popup and clear the highlight.
    fn dismiss(&mut self) {
        self.set_open(false);
        self.set_highlighted_index(None);
    }

    /// Move the highlight down one row (wraps around).
    fn highlight_next(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let next = match self.highlighted_index() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.set_highlighted_index(Some(next));
    }

    /// Move the highlight up one row (wraps around).
    fn highlight_prev(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let prev = match self.highlighted_index() {
            Some(i) => i.checked_sub(1).unwrap_or(count - 1),
            None => count - 1,
        };
        self.set_highlighted_index(Some(prev));
    }

    /// Confirm the highlighted row and close the popup.
    ///
    /// Returns the confirmed index, or `None` when nothing was highlighted
    /// (a null selection, which callers must ignore).
    fn confirm(&mut self) -> Option<usize> {
        let index = self.highlighted_index().filter(|i| *i < self.item_count());
        self.dismiss();
        index
    }
}

/// Default combobox provider: plain list navigation state.
#[derive(Debug, Clone, Default)]
pub struct ListCombobox {
    open: bool,
    count: usize,
    highlighted: Option<usize>,
}

impl ListCombobox {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Combobox for ListCombobox {
    fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn item_count(&self) -> usize {
        self.count
    }

    fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    fn set_highlighted_index(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn set_item_count(&mut self, count: usize) {
        self.count = count;
        // Drop a highlight that now points past the end
        if let Some(i) = self.highlighted {
            if i >= count {
                self.highlighted = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(count: usize) -> ListCombobox {
        let mut combobox = ListCombobox::new();
        combobox.set_item_count(count);
        combobox.toggle();
        combobox
    }

    #[test]
    fn test_highlight_wraps_around() {
        let mut combobox = open_with(3);

        combobox.highlight_next();
        assert_eq!(combobox.highlighted_index(), Some(0));
        combobox.highlight_next();
        combobox.highlight_next();
        combobox.highlight_next();
        assert_eq!(combobox.highlighted_index(), Some(0));

        combobox.highlight_prev();
        assert_eq!(combobox.highlighted_index(), Some(2));
    }

    #[test]
    fn test_confirm_without_highlight_is_null() {
        let mut combobox = open_with(3);

        assert_eq!(combobox.confirm(), None);
        assert!(!combobox.is_open());
    }

    #[test]
    fn test_confirm_returns_highlighted_index_and_closes() {
        let mut combobox = open_with(3);
        combobox.highlight_next();
        combobox.highlight_next();

        assert_eq!(combobox.confirm(), Some(1));
        assert!(!combobox.is_open());
        assert_eq!(combobox.highlighted_index(), None);
    }

    #[test]
    fn test_empty_list_never_highlights() {
        let mut combobox = open_with(0);

        combobox.highlight_next();
        combobox.highlight_prev();
        assert_eq!(combobox.highlighted_index(), None);
        assert_eq!(combobox.confirm(), None);
    }

    #[test]
    fn test_shrinking_list_drops_dangling_highlight() {
        let mut combobox = open_with(5);
        combobox.highlight_prev();
        assert_eq!(combobox.highlighted_index(), Some(4));

        combobox.set_item_count(2);
        assert_eq!(combobox.highlighted_index(), None);
    }
}

//! Dropdown popup placement.

use ratatui::layout::Rect;

/// Popup offset in frame cells, recomputed on open and on scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownPosition {
    pub top: u16,
    pub left: u16,
}

/// Position the popup flush beneath the trigger rect.
///
/// Falls back to the frame origin when the trigger is not laid out yet.
pub fn dropdown_position(trigger: Option<Rect>) -> DropdownPosition {
    match trigger {
        Some(rect) => DropdownPosition {
            top: rect.y.saturating_add(rect.height),
            left: rect.x,
        },
        None => DropdownPosition::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_sits_flush_beneath_trigger() {
        let trigger = Rect::new(4, 2, 30, 3);
        let position = dropdown_position(Some(trigger));
        assert_eq!(position, DropdownPosition { top: 5, left: 4 });
    }

    #[test]
    fn test_missing_trigger_defaults_to_origin() {
        assert_eq!(dropdown_position(None), DropdownPosition { top: 0, left: 0 });
    }
}

//! Select popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::select::{DropdownContent, InputSelect};
use crate::tui::theme::*;

const POPUP_WIDTH: u16 = 32;

/// Render the select popup anchored beneath its trigger.
///
/// Nothing is drawn while the popup is closed; content priority (loading,
/// empty, items) comes from the widget.
pub fn render_dropdown<T: Clone>(frame: &mut Frame, area: Rect, select: &InputSelect<T>) {
    let content = select.dropdown_content();

    let mut lines: Vec<Line> = vec![];
    match content {
        DropdownContent::Hidden => return,
        DropdownContent::Loading(label) => {
            lines.push(Line::styled(format!("  {}", label), Style::new().fg(TEXT_DIM)));
        }
        DropdownContent::Empty => {
            lines.push(Line::styled("  No items", Style::new().fg(TEXT_DIM)));
        }
        DropdownContent::Items(rows) => {
            for row in rows {
                let cursor = if row.highlighted { "> " } else { "  " };
                let check = if row.selected { " ✓" } else { "" };

                let label_style = if row.highlighted {
                    Style::new().fg(TEXT_WHITE).bold()
                } else if row.selected {
                    Style::new().fg(LOGO_MINT)
                } else {
                    Style::new().fg(TEXT_WHITE)
                };

                lines.push(Line::from(vec![
                    Span::styled(
                        cursor,
                        if row.highlighted {
                            Style::new().fg(LOGO_MINT)
                        } else {
                            Style::new().fg(TEXT_DIM)
                        },
                    ),
                    Span::styled(row.label, label_style),
                    Span::styled(check, Style::new().fg(LOGO_MINT)),
                ]));
            }
        }
    }

    // Anchor at the stored dropdown position, clamped to the frame
    let position = select.position();
    let width = POPUP_WIDTH.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let x = position.left.min(area.right().saturating_sub(width));
    let y = position.top.min(area.bottom().saturating_sub(height));
    let popup_area = Rect::new(x, y, width, height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", select.label()))
        .title_style(Style::new().fg(LOGO_MINT).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_MINT));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

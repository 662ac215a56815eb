//! Transaction list component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::tui::theme::*;

/// Render the accumulated transaction list with a view-more footer.
pub fn render_transactions(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Transactions ")
        .title_style(Style::new().fg(LOGO_LIGHT_BLUE).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM));

    let mut lines: Vec<Line> = vec![];

    match app.transactions.data() {
        None if app.transactions.loading() => {
            lines.push(Line::styled(
                format!("  Loading transactions {}", app.spinner()),
                Style::new().fg(TEXT_DIM),
            ));
        }
        None => {
            lines.push(Line::styled(
                "  No transactions loaded",
                Style::new().fg(TEXT_DIM),
            ));
        }
        Some(response) => {
            // Leave room for borders and the footer line
            let available = area.height.saturating_sub(3) as usize;
            let selected = app.list_selected.min(response.data.len().saturating_sub(1));

            // Keep the selected row visible
            let offset = if selected >= available && available > 0 {
                selected - available + 1
            } else {
                0
            };

            for (i, transaction) in response
                .data
                .iter()
                .enumerate()
                .skip(offset)
                .take(available)
            {
                let is_selected = i == selected;
                let cursor = if is_selected { "> " } else { "  " };

                let (mark, mark_color) = if transaction.approved {
                    ("✓", APPROVED_GREEN)
                } else {
                    ("•", PENDING_GOLD)
                };

                let name_style = if is_selected {
                    Style::new().fg(TEXT_WHITE).bold()
                } else {
                    Style::new().fg(TEXT_WHITE)
                };

                lines.push(Line::from(vec![
                    Span::styled(
                        cursor,
                        if is_selected {
                            Style::new().fg(LOGO_MINT)
                        } else {
                            Style::new().fg(TEXT_DIM)
                        },
                    ),
                    Span::styled(mark, Style::new().fg(mark_color)),
                    Span::styled(
                        format!(" {} ", transaction.date.format("%b %d")),
                        Style::new().fg(TEXT_DIM),
                    ),
                    Span::styled(format!("{:<24}", transaction.merchant), name_style),
                    Span::styled(
                        format!("{:<20}", transaction.employee.full_name()),
                        Style::new().fg(LOGO_LIGHT_BLUE),
                    ),
                    Span::styled(
                        format!("${:>9.2}", transaction.amount),
                        Style::new().fg(LOGO_GOLD),
                    ),
                ]));
            }

            lines.push(footer_line(app, response.data.len()));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn footer_line(app: &App, shown: usize) -> Line<'static> {
    if app.transactions.loading() {
        Line::styled(
            format!("  loading more {}", app.spinner()),
            Style::new().fg(TEXT_DIM),
        )
    } else if app.transactions.has_more() {
        Line::from(vec![
            Span::styled("  [m]", Style::new().fg(TEXT_WHITE)),
            Span::styled(
                format!(" view more ({} loaded)", shown),
                Style::new().fg(TEXT_DIM),
            ),
        ])
    } else {
        Line::styled(
            format!("  all {} transactions loaded", shown),
            Style::new().fg(TEXT_DIM),
        )
    }
}

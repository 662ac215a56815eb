use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, InputMode};
use crate::tui::components::{render_dropdown, render_transactions};
use crate::tui::theme::*;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = root_layout(area);

    render_logo(frame, layout[0]);
    render_filter_trigger(frame, layout[1], app);
    render_transactions(frame, layout[2], app);
    render_hotkeys(frame, layout[3], app);

    // Popup overlays everything else, anchored beneath the trigger
    render_dropdown(frame, area, &app.employee_select);
}

/// The trigger rect of the employee filter for a given frame area.
///
/// Shared with the event loop so position recomputes and click hit-testing
/// agree with what was rendered.
pub fn filter_trigger_rect(area: Rect) -> Rect {
    let block = root_layout(area)[1];
    Rect::new(block.x, block.y.saturating_add(1), block.width.min(40), 1)
}

fn root_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(2), // Logo + spacing
        Constraint::Length(2), // Filter label + trigger
        Constraint::Min(0),    // Transaction list
        Constraint::Length(1), // Hotkeys
    ])
    .split(area)
}

fn render_logo(frame: &mut Frame, area: Rect) {
    let padding = (area.width.saturating_sub(6)) / 2;
    let centered = Line::from(vec![
        Span::raw(" ".repeat(padding as usize)),
        Span::styled("t", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("x", Style::new().fg(LOGO_GOLD).bold()),
        Span::styled("d", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        Span::styled("a", Style::new().fg(LOGO_MINT).bold()),
        Span::styled("s", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("h", Style::new().fg(LOGO_GOLD).bold()),
    ]);

    frame.render_widget(Paragraph::new(centered), area);
}

fn render_filter_trigger(frame: &mut Frame, area: Rect, app: &App) {
    let select = &app.employee_select;

    let label = Line::styled(select.label().to_string(), Style::new().fg(TEXT_DIM));

    let value = select.input_value();
    let display = if value.is_empty() {
        "All employees".to_string()
    } else {
        value
    };
    let trigger = Line::from(vec![
        Span::styled(
            display,
            if app.input_mode == InputMode::FilterSelect {
                Style::new().fg(TEXT_WHITE).bold()
            } else {
                Style::new().fg(TEXT_WHITE)
            },
        ),
        Span::styled(" ▾", Style::new().fg(LOGO_LIGHT_BLUE)),
    ]);

    frame.render_widget(Paragraph::new(vec![label, trigger]), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let hotkeys = match app.input_mode {
        InputMode::Normal => vec![
            ("[f]", " filter · "),
            ("[m]", " view more · "),
            ("[r]", " refresh · "),
            ("[j/k]", " move · "),
            ("[q]", " quit"),
        ],
        InputMode::FilterSelect => vec![
            ("[↑/↓]", " navigate · "),
            ("[Enter]", " select · "),
            ("[Esc]", " close · "),
            ("", "type to search"),
        ],
    };

    let mut spans = vec![];
    for (key, rest) in hotkeys {
        spans.push(Span::styled(key, Style::new().fg(TEXT_WHITE)));
        spans.push(Span::styled(rest, Style::new().fg(TEXT_DIM)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

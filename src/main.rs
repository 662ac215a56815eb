mod app;
mod config;
mod error;
mod fetch;
mod log;
mod select;
mod services;
mod transactions;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::layout::Position;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

use app::{App, InputMode};
use config::Config;
use error::TxdashError;
use fetch::CachedFetcher;
use select::ScrollDebouncer;
use services::LocalApi;
use transactions::{EMPLOYEES_ENDPOINT, Employee, TRANSACTIONS_ENDPOINT};

#[tokio::main]
async fn main() -> Result<()> {
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut page_size_override: Option<usize> = None;
    let mut seed_override: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--page-size" | "-p" => {
                if i + 1 < args.len() {
                    page_size_override = args[i + 1].parse().ok();
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --page-size requires a number argument");
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed_override = args[i + 1].parse().ok();
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --seed requires a number argument");
                    i += 1;
                }
            }
            arg => {
                eprintln!("Warning: ignoring unknown argument '{}'", arg);
                i += 1;
            }
        }
    }

    let config = Config::load().with_overrides(page_size_override, seed_override);
    let fetcher = CachedFetcher::new(LocalApi::new(&config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Run the app
    let result = run_app(&mut terminal, &mut app, &fetcher).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    fetcher: &CachedFetcher<LocalApi>,
) -> error::Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut debouncer = ScrollDebouncer::default();
    let mut ticker = tokio::time::interval(Duration::from_millis(120));

    // Initial loads: employee roster, then the first transaction page
    let employees = fetcher
        .fetch_with_cache::<Vec<Employee>, _>(EMPLOYEES_ENDPOINT, &())
        .await
        .unwrap_or_default();
    app.set_employees(employees);
    app.transactions.fetch_all(fetcher).await;

    loop {
        // Render
        terminal
            .draw(|frame| tui::ui::render(frame, app))
            .map_err(|e| TxdashError::Terminal(e.to_string()))?;

        // The trigger rect for this frame, shared between render and events
        let trigger = terminal
            .size()
            .ok()
            .map(|size| tui::ui::filter_trigger_rect(Rect::new(0, 0, size.width, size.height)));

        tokio::select! {
            maybe_event = event_stream.next() => {
                let Some(Ok(event)) = maybe_event else { continue };

                // Mouse events: scroll reposition / list movement, click to toggle
                if let Event::Mouse(mouse) = &event {
                    match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            if let Some(delta) = debouncer.accumulate(-1) {
                                handle_scroll(app, delta, trigger);
                            }
                        }
                        MouseEventKind::ScrollDown => {
                            if let Some(delta) = debouncer.accumulate(1) {
                                handle_scroll(app, delta, trigger);
                            }
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            let on_trigger = trigger
                                .is_some_and(|t| t.contains(Position::new(mouse.column, mouse.row)));
                            if on_trigger {
                                app.toggle_filter(trigger);
                            } else if app.input_mode == InputMode::FilterSelect {
                                // Outside click closes the popup
                                app.close_filter();
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                // Key events
                if let Event::Key(key) = event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match app.input_mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => return Ok(()),
                            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                            KeyCode::Char('k') | KeyCode::Up => app.prev_row(),
                            KeyCode::Char('f') => app.toggle_filter(trigger),
                            KeyCode::Char('m') | KeyCode::Enter => {
                                app.transactions.fetch_all(fetcher).await;
                            }
                            KeyCode::Char('r') => {
                                // Full refresh: drop the response cache and start over
                                fetcher.invalidate(TRANSACTIONS_ENDPOINT);
                                app.transactions.invalidate_data();
                                app.list_selected = 0;
                                app.transactions.fetch_all(fetcher).await;
                            }
                            _ => {}
                        },
                        InputMode::FilterSelect => match key.code {
                            KeyCode::Esc => app.close_filter(),
                            KeyCode::Down => app.employee_select.highlight_next(),
                            KeyCode::Up => app.employee_select.highlight_prev(),
                            KeyCode::Enter => {
                                if app.confirm_filter().is_some() {
                                    app.transactions.fetch_all(fetcher).await;
                                }
                            }
                            KeyCode::Backspace => app.employee_select.input_backspace(),
                            KeyCode::Char(c) => app.employee_select.input_char(c),
                            _ => {}
                        },
                    }
                }
            }
            _ = ticker.tick() => {
                app.tick_spinner();
            }
        }
    }
}

/// Route a debounced scroll delta: the open popup repositions, otherwise the
/// transaction list moves.
fn handle_scroll(app: &mut App, delta: i32, trigger: Option<Rect>) {
    match app.input_mode {
        InputMode::FilterSelect => app.employee_select.handle_scroll(trigger),
        InputMode::Normal => app.scroll_rows(delta),
    }
}

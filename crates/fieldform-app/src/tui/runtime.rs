/*
[INPUT]:  AppConfig, log buffer, crossterm input
[OUTPUT]: Ratatui-based TUI run loop and shared styles
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or capture scheduling
*/

use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use fieldform_app::logging::LogBufferHandle;
use fieldform_app::{AppConfig, build_capture, open_sink};
use fieldform_capture::{FormSession, StatusLevel, StatusMessage};

use super::app::{AppState, Tab};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::{draw_form, draw_gate, draw_logs, draw_tabs};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
}

pub async fn run_tui_with_log(config: &AppConfig, log_buffer: LogBufferHandle) -> Result<()> {
    let session = FormSession::new(build_capture(&config.capture)?);
    let sink = open_sink(&config.storage, session.id()).await?;
    info!(session_id = %session.id(), "tui session started");

    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(session, sink, log_buffer);
    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        terminal.draw(|frame| draw_ui(frame, &app))?;

        if app.pending_capture {
            // the "requesting" frame is already on screen while this suspends
            app.run_capture().await;
            continue;
        }

        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key)))
                        if key.kind == KeyEventKind::Press =>
                    {
                        if handle_key_event(&mut app, key).await {
                            should_quit = true;
                        }
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }
    }

    input_shutdown.cancel();
    info!(session_id = %app.session.id(), "tui session closed");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    draw_tabs(frame, layout[1], app.current_tab);

    match app.current_tab {
        Tab::Logs => draw_logs(frame, layout[0], &app.log_buffer),
        Tab::Form if app.is_gated() => {
            let gate_area = centered_rect(layout[0], 60, 50);
            draw_gate(frame, gate_area);
        }
        Tab::Form => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(8),
                    Constraint::Length(6),
                ])
                .split(layout[0]);

            let capture_messages = if app.pending_capture {
                vec![StatusMessage::new(StatusLevel::Info, "Requesting location...")]
            } else {
                app.capture_messages.clone()
            };
            draw_messages(frame, content[0], "Location", &capture_messages);
            draw_form(frame, content[1], &app.form);
            draw_messages(frame, content[2], "Submission", &app.submit_messages);
        }
    }

    draw_footer(frame, layout[2], app);
}

pub(super) fn draw_messages(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    messages: &[StatusMessage],
) {
    let lines = messages
        .iter()
        .map(|message| Line::from(Span::styled(message.text.clone(), level_style(message.level))))
        .collect::<Vec<_>>();
    let widget = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(title.to_string()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = if app.is_gated() {
        vec![Span::styled("[Enter]", key_style), Span::raw(" Acknowledge  ")]
    } else {
        vec![
            Span::styled("[Tab/Up/Down]", key_style),
            Span::raw(" Move  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Next/Press  "),
        ]
    };
    spans.extend([
        Span::styled("[F2]", key_style),
        Span::raw(" Logs  "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn level_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default(),
        StatusLevel::Success => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
        StatusLevel::Warning => Style::default().fg(Color::Yellow),
        StatusLevel::Error => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

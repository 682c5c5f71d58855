/*
[INPUT]:  LogBufferHandle snapshots
[OUTPUT]: Log panel showing the newest lines that fit
[POS]:    TUI UI logs panel rendering
[UPDATE]: 2026-08-21 Move draw_logs out of runtime.rs
[UPDATE]: 2026-10-18 Tolerate a poisoned log buffer lock
*/

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use fieldform_app::logging::LogBufferHandle;

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let lines = buffer
        .lock()
        .map(|guard| guard.snapshot())
        .unwrap_or_default();
    let available = area.height.saturating_sub(2) as usize;

    let text = tail(&lines, available)
        .iter()
        .map(|line| Line::from(Span::raw(line.clone())))
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Logs"),
    );
    frame.render_widget(log_widget, area);
}

fn tail(lines: &[String], available: usize) -> &[String] {
    let start = lines.len().saturating_sub(available);
    &lines[start..]
}

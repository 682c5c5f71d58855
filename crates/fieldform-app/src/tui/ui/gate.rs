/*
[INPUT]:  Permission gate wording
[OUTPUT]: Gate screen with the location warning and acknowledgement control
[POS]:    TUI UI gate panel
[UPDATE]: When gate wording or controls change
*/

use fieldform_capture::PermissionGate;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_gate(frame: &mut ratatui::Frame, area: Rect) {
    let warning_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let button_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Text::from(vec![
        Line::from(Span::styled(PermissionGate::WARNING, warning_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", button_style),
            Span::raw(" "),
            Span::raw(PermissionGate::ACKNOWLEDGE_LABEL),
        ]),
    ]);

    let widget = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Location Required"),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

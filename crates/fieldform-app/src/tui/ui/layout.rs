/*
[INPUT]:  Current tab
[OUTPUT]: Tab bar renderer
[POS]:    TUI UI layout helpers
[UPDATE]: 2026-08-21 Add tab bar renderer
[UPDATE]: 2026-09-02 Drop the Create tab; Form and Logs only
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::tui::app::Tab;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_tabs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    current_tab: Tab,
) {
    let titles = vec![Line::from("Form"), Line::from("Logs")];
    let selected = match current_tab {
        Tab::Form => 0,
        Tab::Logs => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Tabs"),
        )
        .highlight_style(header_style())
        .select(selected);

    frame.render_widget(tabs, area);
}

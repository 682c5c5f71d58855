/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod form;
mod gate;
mod layout;
mod logs;

pub(in crate::tui) use form::{FieldForm, FormAction, draw_form};
pub(in crate::tui) use gate::draw_gate;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;

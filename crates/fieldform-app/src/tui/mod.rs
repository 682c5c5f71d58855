/*
[INPUT]:  AppConfig and the shared log buffer
[OUTPUT]: Full-screen gated field form
[POS]:    TUI module for the fieldform binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_tui_with_log;

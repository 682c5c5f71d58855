/*
[INPUT]:  Crossterm key events
[OUTPUT]: TUI event routing for the gate screen and the form
[POS]:    TUI event module
[UPDATE]: When changing keybindings
[UPDATE]: 2026-09-02 Lock form input while a capture is pending
*/

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{AppState, Tab};
use super::ui::FormAction;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    if key.code == KeyCode::F(2) {
        app.next_tab();
        return false;
    }

    if app.current_tab == Tab::Logs {
        return false;
    }

    if app.is_gated() {
        if key.code == KeyCode::Enter {
            app.acknowledge();
        }
        return false;
    }

    // answers are only editable once a capture has produced the form
    if app.pending_capture {
        return false;
    }

    match app.form.handle_key(key.code) {
        FormAction::Submit => app.submit().await,
        FormAction::RetryCapture => app.retry_capture(),
        FormAction::None => {}
    }
    false
}

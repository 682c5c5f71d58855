/*
[INPUT]:  Form field state, captured coordinate display values, and key events
[OUTPUT]: Questionnaire rendering and form action results
[POS]:    TUI UI field form component
[UPDATE]: 2026-08-21 Replace modal fields with the questionnaire form
[UPDATE]: 2026-09-02 Add Retry location button
*/

use fieldform_capture::FormFields;
use ratatui::crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::runtime::border_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum FormAction {
    Submit,
    RetryCapture,
    None,
}

pub(in crate::tui) enum Field {
    TextInput { label: &'static str, value: String },
    ReadOnly { label: &'static str, value: String },
    Button { label: &'static str, action: FormAction },
}

impl Field {
    fn is_focusable(&self) -> bool {
        !matches!(self, Field::ReadOnly { .. })
    }
}

const NAME: usize = 0;
const ROLE: usize = 1;
const TASK: usize = 2;
const NOTES: usize = 3;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;

/// Questionnaire with read-only coordinate echo
pub(in crate::tui) struct FieldForm {
    fields: Vec<Field>,
    focus_index: usize,
}

impl FieldForm {
    pub(in crate::tui) fn new() -> Self {
        Self {
            fields: vec![
                Field::TextInput {
                    label: "Question 1: What is your name?",
                    value: String::new(),
                },
                Field::TextInput {
                    label: "Question 2: What is your role?",
                    value: String::new(),
                },
                Field::TextInput {
                    label: "Question 3: Describe your task today.",
                    value: String::new(),
                },
                Field::TextInput {
                    label: "Question 4: Any additional notes?",
                    value: String::new(),
                },
                Field::ReadOnly {
                    label: "Latitude (Auto-captured)",
                    value: String::new(),
                },
                Field::ReadOnly {
                    label: "Longitude (Auto-captured)",
                    value: String::new(),
                },
                Field::Button {
                    label: "Submit",
                    action: FormAction::Submit,
                },
                Field::Button {
                    label: "Retry location",
                    action: FormAction::RetryCapture,
                },
            ],
            focus_index: 0,
        }
    }

    pub(in crate::tui) fn set_coordinates(&mut self, latitude: String, longitude: String) {
        if let Some(Field::ReadOnly { value, .. }) = self.fields.get_mut(LATITUDE) {
            *value = latitude;
        }
        if let Some(Field::ReadOnly { value, .. }) = self.fields.get_mut(LONGITUDE) {
            *value = longitude;
        }
    }

    pub(in crate::tui) fn answers(&self) -> FormFields {
        FormFields {
            name: self.text(NAME),
            role: self.text(ROLE),
            task: self.text(TASK),
            notes: self.text(NOTES),
        }
    }

    /// Clear typed answers after an accepted submission
    pub(in crate::tui) fn clear_answers(&mut self) {
        for field in &mut self.fields {
            if let Field::TextInput { value, .. } = field {
                value.clear();
            }
        }
        self.focus_index = NAME;
    }

    fn text(&self, index: usize) -> String {
        match self.fields.get(index) {
            Some(Field::TextInput { value, .. } | Field::ReadOnly { value, .. }) => value.clone(),
            _ => String::new(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        let mut index = self.focus_index;
        for _ in 0..len {
            index = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            if self.fields[index].is_focusable() {
                self.focus_index = index;
                return;
            }
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                FormAction::None
            }
            KeyCode::Backspace => {
                if let Some(Field::TextInput { value, .. }) = self.fields.get_mut(self.focus_index) {
                    value.pop();
                }
                FormAction::None
            }
            KeyCode::Char(ch) => {
                if let Some(Field::TextInput { value, .. }) = self.fields.get_mut(self.focus_index) {
                    value.push(ch);
                }
                FormAction::None
            }
            KeyCode::Enter => match self.fields.get(self.focus_index) {
                Some(Field::Button { action, .. }) => *action,
                _ => {
                    self.move_focus(true);
                    FormAction::None
                }
            },
            _ => FormAction::None,
        }
    }
}

pub(in crate::tui) fn draw_form(frame: &mut ratatui::Frame, area: Rect, form: &FieldForm) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Field Data Form");

    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focus_index;
            let (content, base) = match field {
                Field::TextInput { label, value } => {
                    let cursor = if focused { "_" } else { "" };
                    (format!("{label} {value}{cursor}"), Style::default())
                }
                Field::ReadOnly { label, value } => (
                    format!("{label}: {value}"),
                    Style::default().fg(Color::DarkGray),
                ),
                Field::Button { label, .. } => (format!("[{label}]"), Style::default()),
            };
            let style = if focused {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            Line::from(Span::styled(content, style))
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut FieldForm, text: &str) {
        for ch in text.chars() {
            form.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_fills_answers_in_order() {
        let mut form = FieldForm::new();
        type_text(&mut form, "Alice");
        form.handle_key(KeyCode::Enter);
        type_text(&mut form, "Surveyor");
        form.handle_key(KeyCode::Tab);
        type_text(&mut form, "Plot 7");
        form.handle_key(KeyCode::Tab);
        type_text(&mut form, "nonee");
        form.handle_key(KeyCode::Backspace);

        let answers = form.answers();
        assert_eq!(answers.name, "Alice");
        assert_eq!(answers.role, "Surveyor");
        assert_eq!(answers.task, "Plot 7");
        assert_eq!(answers.notes, "none");
    }

    #[test]
    fn test_focus_skips_read_only_coordinates() {
        let mut form = FieldForm::new();
        form.set_coordinates("12.5".to_string(), "77.6".to_string());
        for _ in 0..4 {
            form.handle_key(KeyCode::Tab);
        }
        // past notes, straight onto the submit button
        assert_eq!(form.handle_key(KeyCode::Enter), FormAction::Submit);
        form.handle_key(KeyCode::Tab);
        assert_eq!(form.handle_key(KeyCode::Enter), FormAction::RetryCapture);

        // read-only fields ignore typing
        type_text(&mut form, "x");
        assert_eq!(form.text(LATITUDE), "12.5");
        assert_eq!(form.text(LONGITUDE), "77.6");
    }

    #[test]
    fn test_backtab_wraps_around() {
        let mut form = FieldForm::new();
        form.handle_key(KeyCode::BackTab);
        assert_eq!(form.handle_key(KeyCode::Enter), FormAction::RetryCapture);
    }

    #[test]
    fn test_clear_answers_keeps_coordinates() {
        let mut form = FieldForm::new();
        type_text(&mut form, "Bob");
        form.set_coordinates("1".to_string(), "2".to_string());
        form.clear_answers();
        assert_eq!(form.answers(), FormFields::default());
        assert_eq!(form.text(LATITUDE), "1");
    }
}

/*
[INPUT]:  Status messages from the form session
[OUTPUT]: Line-oriented front-ends (prompt and one-shot submit)
[POS]:    CLI module root and shared console output helpers
[UPDATE]: When adding line-oriented front-ends
*/

pub mod prompt;
pub mod submit;

use console::style;
use fieldform_capture::{StatusLevel, StatusMessage};

pub(crate) fn print_status(message: &StatusMessage) {
    let text = message.text.as_str();
    match message.level {
        StatusLevel::Info => println!("{text}"),
        StatusLevel::Success => println!("{}", style(text).green()),
        StatusLevel::Warning => println!("{}", style(text).yellow()),
        StatusLevel::Error => println!("{}", style(text).red()),
    }
}

pub(crate) fn print_all(messages: &[StatusMessage]) {
    for message in messages {
        print_status(message);
    }
}

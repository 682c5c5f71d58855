/*
[INPUT]:  AppConfig and answers typed at dialoguer prompts
[OUTPUT]: Gated capture, questionnaire and submissions written to the store
[POS]:    CLI interactive prompt flow
[UPDATE]: When questionnaire wording or retry choices change
*/

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use fieldform_capture::{FormFields, FormSession, PermissionGate, RenderView, StatusMessage};

use fieldform_app::{AppConfig, build_capture, open_sink};

use super::{print_all, print_status};

pub async fn run_prompt(config: &AppConfig) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Field Data Collection").bold().cyan());

    let mut session = FormSession::new(build_capture(&config.capture)?);
    if !wait_for_gate(&theme)? {
        return Ok(());
    }
    session.acknowledge();

    let sink = open_sink(&config.storage, session.id()).await?;
    let mut answers = FormFields::default();

    loop {
        println!("{}", style("Requesting location...").dim());
        let view = session.render().await;
        print_all(view.messages());
        if let RenderView::Form {
            latitude,
            longitude,
            result,
            ..
        } = &view
        {
            if let Some(hint) = StatusMessage::capture_hint(result) {
                print_status(&hint);
            }
            println!("Latitude (auto-captured): {latitude}");
            println!("Longitude (auto-captured): {longitude}");
        }

        println!("{}", style("Field Data Form").bold());
        answers = ask_answers(&theme, answers)?;

        let outcome = session.submit(answers.clone(), sink.as_ref()).await;
        print_all(outcome.messages());

        let actions = if outcome.is_accepted() {
            vec!["Submit another record", "Retry location capture", "Exit"]
        } else {
            vec!["Retry location capture", "Submit again", "Exit"]
        };
        let selection = Select::with_theme(&theme)
            .with_prompt("Next")
            .items(&actions)
            .default(0)
            .interact()?;

        match actions[selection] {
            "Submit another record" => answers = FormFields::default(),
            "Retry location capture" => {
                session.acknowledge();
                session.request_recapture();
            }
            "Submit again" => {}
            _ => return Ok(()),
        }
    }
}

fn wait_for_gate(theme: &ColorfulTheme) -> Result<bool> {
    let items = [PermissionGate::ACKNOWLEDGE_LABEL, "Exit"];
    print_status(&StatusMessage::gate_warning());
    let selection = Select::with_theme(theme)
        .with_prompt("Location")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(selection == 0)
}

fn ask_answers(theme: &ColorfulTheme, previous: FormFields) -> Result<FormFields> {
    let name = ask(theme, "Question 1: What is your name?", previous.name)?;
    let role = ask(theme, "Question 2: What is your role?", previous.role)?;
    let task = ask(theme, "Question 3: Describe your task today.", previous.task)?;
    let notes = ask(theme, "Question 4: Any additional notes?", previous.notes)?;
    Ok(FormFields {
        name,
        role,
        task,
        notes,
    })
}

fn ask(theme: &ColorfulTheme, prompt: &str, initial: String) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

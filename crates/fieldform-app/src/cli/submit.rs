/*
[INPUT]:  AppConfig and answers passed as CLI flags
[OUTPUT]: One gated capture and submit, with exit status reflecting the outcome
[POS]:    CLI non-interactive submit flow
[UPDATE]: When submit flags or exit codes change
*/

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use fieldform_capture::{FormFields, FormSession, RenderView, StatusMessage, SubmitOutcome};
use tracing::info;

use fieldform_app::{AppConfig, build_capture, open_sink};

use super::{print_all, print_status};

/// Exit status when the location gate was never acknowledged
const EXIT_GATED: u8 = 2;
/// Exit status when the submission was rejected
const EXIT_REJECTED: u8 = 3;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Assert that location services are enabled (opens the gate)
    #[arg(long = "location-enabled")]
    pub location_enabled: bool,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub role: String,
    #[arg(long, default_value = "")]
    pub task: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Print the accepted submission as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_submit(config: &AppConfig, args: SubmitArgs) -> Result<ExitCode> {
    let capture = build_capture(&config.capture)?;
    let mut session = FormSession::new(capture);
    if args.location_enabled {
        session.acknowledge();
    }

    let view = session.render().await;
    print_all(view.messages());
    match &view {
        RenderView::Gated { .. } => {
            println!("Re-run with --location-enabled once location services are on.");
            return Ok(ExitCode::from(EXIT_GATED));
        }
        RenderView::Form { result, .. } => {
            if let Some(hint) = StatusMessage::capture_hint(result) {
                print_status(&hint);
            }
        }
    }

    let sink = open_sink(&config.storage, session.id()).await?;
    let fields = FormFields {
        name: args.name,
        role: args.role,
        task: args.task,
        notes: args.notes,
    };
    let outcome = session.submit(fields, sink.as_ref()).await;
    print_all(outcome.messages());

    match outcome {
        SubmitOutcome::Accepted { submission, .. } => {
            if args.json {
                let rendered =
                    serde_json::to_string_pretty(&submission).context("serialize submission")?;
                println!("{rendered}");
            }
            info!(session_id = %session.id(), "submit command finished");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected { .. } => Ok(ExitCode::from(EXIT_REJECTED)),
    }
}

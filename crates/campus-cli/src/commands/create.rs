use std::io::{self, BufRead, IsTerminal, Write};

use campus_core::cache::ListCache;
use campus_core::conflict::ConflictError;
use campus_core::forms::FieldErrors;
use campus_core::models::validate_payload;
use campus_core::notify::ToastQueue;
use campus_core::resolution::{CreateFlow, FlowOutcome, Resolution};
use campus_core::{Record, ResourceKind};
use serde_json::Value;

use crate::cli::ConflictChoice;
use crate::commands::common::{build_client, flush_toasts, resolve_payload};
use crate::error::CliError;

/// Forced resubmits allowed without a human deciding each one.
const MAX_UNATTENDED_RESOLUTIONS: usize = 2;

pub async fn run_create(
    kind: ResourceKind,
    data: Option<&str>,
    on_conflict: ConflictChoice,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let payload = validate_payload(kind, resolve_payload(data)?)?;
    let client = build_client(global_profile)?;
    let cache = ListCache::new();
    let toasts = ToastQueue::new();
    let mut flow = CreateFlow::<Value, _, _, _>::new(kind, &client, &cache, toasts.clone());

    let mut outcome = flow.submit(payload).await?;
    let mut resolutions = 0usize;

    while let FlowOutcome::ConflictOpened(conflict) = &outcome {
        let resolution = match on_conflict.resolution() {
            Some(_) if resolutions >= MAX_UNATTENDED_RESOLUTIONS => Resolution::Cancel,
            Some(fixed) => fixed,
            None => prompt_resolution(conflict)?,
        };
        resolutions += 1;
        tracing::debug!(resource = %kind, ?resolution, "Resolving deleted duplicate");
        outcome = flow.resolve(resolution).await?;
    }

    flush_toasts(&toasts);
    report_outcome(kind, outcome, as_json)
}

fn report_outcome(kind: ResourceKind, outcome: FlowOutcome, as_json: bool) -> Result<(), CliError> {
    match outcome {
        FlowOutcome::Created(record) => print_record(&record, "Created", as_json),
        FlowOutcome::Reactivated(record) => print_record(&record, "Reactivated", as_json),
        FlowOutcome::FieldErrors(errors) => {
            for line in format_field_errors(&errors) {
                eprintln!("{line}");
            }
            Err(CliError::CreateIncomplete(kind.label().to_string()))
        }
        FlowOutcome::Cancelled => {
            eprintln!("Cancelled; nothing was created.");
            Err(CliError::CreateIncomplete(kind.label().to_string()))
        }
        FlowOutcome::ReactivateFailed(message) => Err(CliError::ReactivateFailed(message)),
        FlowOutcome::Failed(_) | FlowOutcome::ConflictOpened(_) => {
            Err(CliError::CreateIncomplete(kind.label().to_string()))
        }
    }
}

fn print_record(record: &Record, verb: &str, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{verb} {} ({})", record.display_name(), record.id);
    }
    Ok(())
}

pub fn format_field_errors(errors: &FieldErrors) -> Vec<String> {
    let mut lines = errors
        .non_field()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    for (field, messages) in errors.iter() {
        for message in messages {
            lines.push(format!("{field}: {message}"));
        }
    }
    lines
}

fn prompt_resolution(conflict: &ConflictError) -> Result<Resolution, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        eprintln!("{}", conflict.message);
        eprintln!("stdin is not a terminal; cancelling. Pass --on-conflict to decide up front.");
        return Ok(Resolution::Cancel);
    }

    eprintln!("{}", conflict.message);
    let options = if conflict.can_reactivate() {
        "[r]eactivate, create [n]ew, [c]ancel"
    } else {
        "create [n]ew, [c]ancel (reactivation unavailable)"
    };

    loop {
        eprint!("{options}: ");
        io::stderr().flush()?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            return Ok(Resolution::Cancel);
        }
        if let Some(resolution) = parse_resolution_answer(&answer, conflict.can_reactivate()) {
            return Ok(resolution);
        }
    }
}

/// Maps a prompt answer onto a resolution; reactivation is only offered
/// when the deleted record's identifier is known.
pub fn parse_resolution_answer(answer: &str, can_reactivate: bool) -> Option<Resolution> {
    match answer.trim().to_lowercase().as_str() {
        "r" | "reactivate" if can_reactivate => Some(Resolution::Reactivate),
        "n" | "new" | "create-new" => Some(Resolution::CreateNew),
        "c" | "cancel" | "" => Some(Resolution::Cancel),
        _ => None,
    }
}

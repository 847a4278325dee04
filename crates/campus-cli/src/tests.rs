use campus_core::forms::FieldErrors;
use campus_core::resolution::Resolution;
use campus_core::{Record, ResourceKind};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::cli::{Cli, Commands, CompletionShell, ConflictChoice};
use crate::commands::common::{
    format_record_detail, format_record_lines, normalize_record_id, parse_payload, truncate,
};
use crate::commands::completions::render_completions;
use crate::commands::config::{format_profile, merge_profile, ProfileInput};
use crate::commands::create::{format_field_errors, parse_resolution_answer};
use crate::commands::list::{collected_footer, page_footer};
use crate::config_profiles::CliProfile;
use crate::error::CliError;

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).unwrap()
}

#[test]
fn create_parses_resource_alias_and_conflict_choice() {
    let cli = Cli::try_parse_from([
        "campus",
        "create",
        "leave_allocation",
        "--data",
        "{}",
        "--on-conflict",
        "create-new",
    ])
    .unwrap();

    let Some(Commands::Create {
        resource,
        data,
        on_conflict,
        json,
    }) = cli.command
    else {
        panic!("expected create command");
    };
    assert_eq!(resource, ResourceKind::LeaveAllocations);
    assert_eq!(data.as_deref(), Some("{}"));
    assert_eq!(on_conflict, ConflictChoice::CreateNew);
    assert!(!json);
}

#[test]
fn unknown_resource_is_rejected_by_parser() {
    assert!(Cli::try_parse_from(["campus", "list", "janitors"]).is_err());
}

#[test]
fn list_all_conflicts_with_explicit_page() {
    assert!(Cli::try_parse_from(["campus", "list", "teachers", "--all", "--page", "2"]).is_err());
    assert!(Cli::try_parse_from(["campus", "list", "teachers", "--all"]).is_ok());
}

#[test]
fn conflict_choice_maps_to_resolution() {
    assert_eq!(ConflictChoice::Prompt.resolution(), None);
    assert_eq!(
        ConflictChoice::Reactivate.resolution(),
        Some(Resolution::Reactivate)
    );
    assert_eq!(ConflictChoice::Cancel.resolution(), Some(Resolution::Cancel));
}

#[test]
fn prompt_answers_respect_reactivation_availability() {
    assert_eq!(
        parse_resolution_answer(" R\n", true),
        Some(Resolution::Reactivate)
    );
    assert_eq!(parse_resolution_answer("r", false), None);
    assert_eq!(parse_resolution_answer("new", false), Some(Resolution::CreateNew));
    assert_eq!(parse_resolution_answer("\n", true), Some(Resolution::Cancel));
    assert_eq!(parse_resolution_answer("maybe", true), None);
}

#[test]
fn field_errors_render_non_field_first() {
    let errors = FieldErrors::from_error(&json!({
        "errors": {
            "non_field_errors": ["Check the highlighted fields."],
            "email": ["Enter a valid email address."],
            "first_name": ["This field is required."],
        }
    }));

    assert_eq!(
        format_field_errors(&errors),
        vec![
            "Check the highlighted fields.".to_string(),
            "email: Enter a valid email address.".to_string(),
            "first_name: This field is required.".to_string(),
        ]
    );
}

#[test]
fn record_lines_flag_inactive_records() {
    let lines = format_record_lines(&[
        record(json!({ "id": "abc-123", "name": "Physics" })),
        record(json!({ "id": "def-456", "name": "Chemistry", "is_active": false })),
    ]);

    assert_eq!(lines[0], "abc-123        Physics");
    assert!(lines[1].starts_with("def-456        Chemistry"));
    assert!(lines[1].ends_with("(inactive)"));
}

#[test]
fn record_detail_sorts_fields() {
    let lines = format_record_detail(&record(json!({
        "id": 7,
        "name": "Grade 5",
        "capacity": 30,
        "section": null,
    })));

    assert_eq!(
        lines,
        vec![
            "id: 7".to_string(),
            "capacity: 30".to_string(),
            "name: Grade 5".to_string(),
            "section: -".to_string(),
        ]
    );
}

#[test]
fn truncate_collapses_whitespace_and_adds_ellipsis() {
    assert_eq!(truncate("Ada   Lovelace", 20), "Ada Lovelace");
    assert_eq!(truncate("A very long subject name indeed", 12), "A very lo...");
}

#[test]
fn page_footer_hints_next_page() {
    assert_eq!(page_footer(1, 40, true), "Page 1 (40 total, more with --page 2)");
    assert_eq!(page_footer(2, 40, false), "Page 2 (40 total)");
}

#[test]
fn collected_footer_flags_truncated_listing() {
    assert_eq!(collected_footer(ResourceKind::Holidays, 12, false), "12 holidays");
    assert_eq!(
        collected_footer(ResourceKind::Students, 2500, true),
        "2500 students (stopped at the page limit; more records exist)"
    );
}

#[test]
fn parse_payload_rejects_blank_and_malformed_json() {
    assert!(matches!(parse_payload("  "), Err(CliError::EmptyPayload)));
    assert!(matches!(
        parse_payload("{not json"),
        Err(CliError::Serialization(_))
    ));
    assert_eq!(
        parse_payload(r#" {"name": "Art"} "#).unwrap(),
        json!({ "name": "Art" })
    );
}

#[test]
fn normalize_record_id_trims_and_rejects_empty() {
    assert_eq!(normalize_record_id("  abc-123 ").unwrap(), "abc-123");
    assert!(matches!(
        normalize_record_id("   "),
        Err(CliError::EmptyRecordId)
    ));
}

#[test]
fn merge_profile_prefers_flags_then_env_then_existing() {
    let existing = CliProfile {
        api_base_url: Some("https://old.school.example".to_string()),
        organization_id: Some("org-old".to_string()),
        role: Some("teacher".to_string()),
        request_timeout_secs: Some(15),
    };
    let input = ProfileInput {
        api_base_url: Some(" https://api.school.example/ ".to_string()),
        ..ProfileInput::default()
    };

    let merged = merge_profile(input, &existing, |key| {
        (key == "CAMPUS_ORGANIZATION_ID").then(|| "org-env".to_string())
    })
    .unwrap();

    assert_eq!(
        merged,
        CliProfile {
            api_base_url: Some("https://api.school.example".to_string()),
            organization_id: Some("org-env".to_string()),
            role: Some("teacher".to_string()),
            request_timeout_secs: Some(15),
        }
    );
}

#[test]
fn merge_profile_validates_values() {
    let bad_url = ProfileInput {
        api_base_url: Some("api.school.example".to_string()),
        ..ProfileInput::default()
    };
    assert!(merge_profile(bad_url, &CliProfile::default(), |_| None).is_err());

    let bad_role = ProfileInput {
        role: Some("janitor".to_string()),
        ..ProfileInput::default()
    };
    assert!(merge_profile(bad_role, &CliProfile::default(), |_| None).is_err());

    let zero_timeout = ProfileInput {
        request_timeout_secs: Some(0),
        ..ProfileInput::default()
    };
    assert!(merge_profile(zero_timeout, &CliProfile::default(), |_| None).is_err());
}

#[test]
fn format_profile_marks_unset_values() {
    let lines = format_profile("default", &CliProfile::default(), true, false);
    assert_eq!(lines[0], "profile: default (active)");
    assert_eq!(lines[1], "api_base_url: (unset)");
    assert_eq!(lines[3], "role: admin");
    assert_eq!(lines[5], "token: none");
}

#[test]
fn completions_target_campus_binary() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("campus"));
    assert!(script.contains("reactivate"));
}

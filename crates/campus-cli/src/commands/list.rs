use campus_core::api::{list_all, ResourceApi};
use campus_core::{Record, ResourceKind};

use crate::commands::common::{
    build_client, format_record_lines, record_to_list_item, RecordListItem,
};
use crate::error::CliError;

pub async fn run_list(
    kind: ResourceKind,
    page: u32,
    all: bool,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let client = build_client(global_profile)?;

    let (records, footer) = if all {
        let collected = list_all(&client, kind).await?;
        let footer = collected_footer(kind, collected.records.len(), collected.truncated);
        (collected.records, footer)
    } else {
        let page_data = client.list(kind, page).await?;
        let footer = page_footer(page, page_data.count, page_data.has_next());
        (page_data.results, footer)
    };

    if as_json {
        let json_items = records
            .iter()
            .map(record_to_list_item)
            .collect::<Vec<RecordListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        print_records(&records);
        println!("{footer}");
    }

    Ok(())
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    for line in format_record_lines(records) {
        println!("{line}");
    }
}

pub fn collected_footer(kind: ResourceKind, count: usize, truncated: bool) -> String {
    let label = kind.label().to_lowercase();
    if truncated {
        format!("{count} {label} (stopped at the page limit; more records exist)")
    } else {
        format!("{count} {label}")
    }
}

pub fn page_footer(page: u32, total: u64, has_next: bool) -> String {
    if has_next {
        format!("Page {page} ({total} total, more with --page {})", page + 1)
    } else {
        format!("Page {page} ({total} total)")
    }
}

use campus_core::api::ResourceApi;
use campus_core::ResourceKind;

use crate::commands::common::{build_client, format_record_detail, normalize_record_id};
use crate::error::CliError;

pub async fn run_show(
    kind: ResourceKind,
    id: &str,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let id = normalize_record_id(id)?;
    let client = build_client(global_profile)?;
    let record = client.retrieve(kind, &id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        for line in format_record_detail(&record) {
            println!("{line}");
        }
    }
    Ok(())
}

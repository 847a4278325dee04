use campus_core::api::ResourceApi;
use campus_core::ResourceKind;

use crate::commands::common::{build_client, normalize_record_id};
use crate::error::CliError;

pub async fn run_reactivate(
    kind: ResourceKind,
    id: &str,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    if !kind.supports_reactivation() {
        return Err(CliError::ReactivationUnsupported(kind.label().to_string()));
    }
    let id = normalize_record_id(id)?;
    let client = build_client(global_profile)?;

    let record = client.reactivate(kind, &id).await?;
    tracing::info!(resource = %kind, id = %record.id, "Reactivated record");
    println!("Reactivated {} ({})", record.display_name(), record.id);
    Ok(())
}

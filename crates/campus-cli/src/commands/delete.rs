use campus_core::api::ResourceApi;
use campus_core::ResourceKind;

use crate::commands::common::{build_client, normalize_record_id};
use crate::error::CliError;

pub async fn run_delete(
    kind: ResourceKind,
    id: &str,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let id = normalize_record_id(id)?;
    let client = build_client(global_profile)?;

    client.delete(kind, &id).await?;
    tracing::info!(resource = %kind, id = %id, "Deleted record");
    println!("{id}");
    if kind.supports_reactivation() {
        println!("Restore it with `campus reactivate {} {id}`.", kind.path_segment());
    }
    Ok(())
}

//! Revert command implementation.

use super::{dispatcher, record_ref, trigger};
use crate::cli::RevertArgs;
use crate::error::Result;
use crate::output::Formatter;
use sfm_client::ClientConfig;
use sfm_domain::ModalType;

/// Execute the revert command.
pub async fn execute_revert(
    args: RevertArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut dispatcher = dispatcher(client, &record_ref(&args.field))?;
    dispatcher
        .on_shown(&trigger(&args.field, ModalType::Version, args.lang.as_deref()))
        .await?;
    dispatcher.revert(&args.version_id).await?;

    println!(
        "{}",
        formatter.success(&format!(
            "Reverted {} to version {}",
            args.field.field, args.version_id
        ))
    );
    if dispatcher.page().reload_requested() {
        println!("{}", formatter.info("Reload the record to see the restored value"));
    }
    Ok(())
}

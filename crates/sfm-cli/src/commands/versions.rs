//! Versions command implementation.

use super::{dispatcher, record_ref, trigger};
use crate::cli::VersionsArgs;
use crate::error::Result;
use crate::output::Formatter;
use sfm_client::ClientConfig;
use sfm_domain::ModalType;

/// Execute the versions command.
pub async fn execute_versions(
    args: VersionsArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut dispatcher = dispatcher(client, &record_ref(&args.field))?;
    dispatcher
        .on_shown(&trigger(&args.field, ModalType::Version, args.lang.as_deref()))
        .await?;

    println!(
        "{}",
        formatter.format_versions(dispatcher.version_editor().view())?
    );
    Ok(())
}

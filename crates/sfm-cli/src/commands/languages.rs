//! Languages command implementation.

use crate::cli::LanguagesArgs;
use crate::error::Result;
use crate::output::Formatter;
use sfm_client::{ClientConfig, HttpBackend};
use sfm_domain::FieldBackend;

/// Execute the languages command.
pub async fn execute_languages(
    args: LanguagesArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let backend = HttpBackend::new(client.clone())?;
    let suggestions = backend.autocomplete_languages(&args.term).await?;
    println!("{}", formatter.format_suggestions(&suggestions)?);
    Ok(())
}

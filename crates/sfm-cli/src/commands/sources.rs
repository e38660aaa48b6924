//! Sources command implementation.

use super::{dispatcher, record_ref, trigger};
use crate::cli::SourcesArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sfm_client::ClientConfig;
use sfm_domain::{ModalType, SaveOutcome};

/// Execute the sources command.
///
/// Lists the sources of a field, applies any edits given on the command
/// line and, with `--save`, saves the record.
pub async fn execute_sources(
    args: SourcesArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let record = record_ref(&args.field);
    let mut dispatcher = dispatcher(client, &record)?;
    dispatcher
        .on_shown(&trigger(&args.field, ModalType::Source, None))
        .await?;

    for id in &args.delete {
        if !dispatcher.delete_source(id)? {
            eprintln!("{}", formatter.warning(&format!("No source with id '{}'", id)));
        }
    }
    for text in &args.add {
        dispatcher.add_source(text, &args.source_confidence)?;
    }
    if let Some(code) = &args.confidence {
        dispatcher.set_confidence(code)?;
    }

    println!("{}", formatter.format_sources(dispatcher.source_editor().view())?);

    let edited = !args.add.is_empty() || !args.delete.is_empty() || args.confidence.is_some();
    if !args.save {
        if edited {
            println!(
                "{}",
                formatter.warning("Changes not saved; pass --save to store them")
            );
        }
        return Ok(());
    }

    if let Some(value) = &args.value {
        dispatcher
            .page_mut()
            .set_input(args.field.field.clone(), value.clone());
    }

    match dispatcher.save(&record).await? {
        SaveOutcome::Saved { id } => {
            println!(
                "{}",
                formatter.success(&format!("Saved {} {}", record.record_type, id))
            );
            if let Some(url) = dispatcher.page().navigated_to() {
                println!("{}", formatter.info(url));
            }
            Ok(())
        }
        SaveOutcome::Rejected { .. } => {
            for (field, message) in dispatcher.page().errors() {
                eprintln!("{}", formatter.field_error(field, message));
            }
            Err(CliError::InvalidInput(format!(
                "{} {} was not saved",
                record.record_type, record.record_id
            )))
        }
    }
}

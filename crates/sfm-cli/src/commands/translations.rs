//! Translations and translate command implementations.

use super::{dispatcher, record_ref, trigger};
use crate::cli::{FieldArgs, TranslateArgs};
use crate::error::Result;
use crate::output::Formatter;
use sfm_client::ClientConfig;
use sfm_domain::ModalType;

/// Execute the translations command.
pub async fn execute_translations(
    args: FieldArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut dispatcher = dispatcher(client, &record_ref(&args))?;
    dispatcher
        .on_shown(&trigger(&args, ModalType::Translate, None))
        .await?;

    println!(
        "{}",
        formatter.format_translations(dispatcher.translation_editor().view())?
    );
    Ok(())
}

/// Execute the translate command.
pub async fn execute_translate(
    args: TranslateArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut dispatcher = dispatcher(client, &record_ref(&args.field))?;
    dispatcher
        .on_shown(&trigger(&args.field, ModalType::Translate, None))
        .await?;
    dispatcher.add_translation(&args.language, &args.value).await?;

    println!(
        "{}",
        formatter.success(&format!(
            "Added {} translation of {}",
            args.language, args.field.field
        ))
    );
    println!(
        "{}",
        formatter.format_translations(dispatcher.translation_editor().view())?
    );
    Ok(())
}

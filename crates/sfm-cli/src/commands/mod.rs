//! Command implementations.

pub mod languages;
pub mod profile;
pub mod revert;
pub mod search;
pub mod sources;
pub mod translations;
pub mod versions;

pub use self::languages::execute_languages;
pub use self::profile::execute_profile;
pub use self::revert::execute_revert;
pub use self::search::execute_search;
pub use self::sources::execute_sources;
pub use self::translations::{execute_translate, execute_translations};
pub use self::versions::execute_versions;

use crate::cli::FieldArgs;
use crate::error::Result;
use crate::page::TerminalPage;
use sfm_client::{ClientConfig, HttpBackend};
use sfm_domain::{ModalType, RecordId, RecordRef};
use sfm_editor::{ModalDispatcher, TriggerAttributes};

/// Dispatcher wired to the HTTP backend and the terminal page
pub type CliDispatcher = ModalDispatcher<HttpBackend, TerminalPage>;

/// Record addressed by the field arguments; `add` means a new record.
pub fn record_ref(field: &FieldArgs) -> RecordRef {
    let id = match field.record_id.as_str() {
        "add" => RecordId::New,
        other => RecordId::parse(other),
    };
    RecordRef::new(field.record_type.clone(), id)
}

/// Trigger attributes equivalent to clicking the field's modal button
pub fn trigger(field: &FieldArgs, modal_type: ModalType, language: Option<&str>) -> TriggerAttributes {
    TriggerAttributes {
        field_str: field.field.clone(),
        model_id: field.record_type.clone(),
        model_object_id: record_ref(field).record_id.path_segment().to_string(),
        modal_type,
        language: language.map(str::to_string),
    }
}

/// Build a dispatcher for the record a command works on
pub fn dispatcher(client: &ClientConfig, record: &RecordRef) -> Result<CliDispatcher> {
    let page = TerminalPage::for_record(&client.base_url, &client.lang, record);
    let backend = HttpBackend::new(client.clone())?;
    Ok(ModalDispatcher::new(backend, page, client.lang.clone()))
}

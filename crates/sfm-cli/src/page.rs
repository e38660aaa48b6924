//! The terminal standing in for the record form page.

use sfm_domain::{Page, RecordRef};
use std::collections::{BTreeMap, HashMap};

/// Page state for one command run.
///
/// Inputs come from command-line flags; errors, navigation and reload
/// requests are collected and printed once the command is done.
#[derive(Debug, Clone, Default)]
pub struct TerminalPage {
    url: String,
    inputs: HashMap<String, String>,
    errors: BTreeMap<String, String>,
    navigated_to: Option<String>,
    reload_requested: bool,
}

impl TerminalPage {
    /// Page for editing `record`, located where the web form would be
    pub fn for_record(base_url: &str, lang: &str, record: &RecordRef) -> Self {
        Self {
            url: format!(
                "{}/{}/{}/{}/",
                base_url.trim_end_matches('/'),
                lang,
                record.record_type,
                record.record_id.save_segment()
            ),
            ..Self::default()
        }
    }

    /// Set an input value
    pub fn set_input(&mut self, field_name: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(field_name.into(), value.into());
    }

    /// Inline errors currently shown
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Where the page was sent, if anywhere
    pub fn navigated_to(&self) -> Option<&str> {
        self.navigated_to.as_deref()
    }

    /// Whether a reload was requested
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }
}

impl Page for TerminalPage {
    fn field_value(&self, field_name: &str) -> Option<String> {
        self.inputs.get(field_name).cloned()
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn clear_field_errors(&mut self) {
        self.errors.clear();
    }

    fn show_field_error(&mut self, field_name: &str, message: &str) {
        self.errors
            .insert(field_name.to_string(), message.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.navigated_to = Some(url.to_string());
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use sfm_client::SearchResults;
use sfm_domain::{LanguageSuggestion, SourceListView, TranslationListView, VersionTableView};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a source list with the field confidence.
    pub fn format_sources(&self, view: &SourceListView) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = view
                    .rows
                    .iter()
                    .map(|r| json!({"id": r.id, "source": r.text, "confidence": r.label}))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "confidence": view.confidence_code,
                    "sources": rows,
                }))?)
            }
            OutputFormat::Quiet => Ok(ids(view.rows.iter().map(|r| r.id.as_str()))),
            OutputFormat::Table => {
                if view.rows.is_empty() {
                    return Ok(self.colorize("No sources found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Source", "Confidence"]);
                for row in &view.rows {
                    builder.push_record([row.id.as_str(), row.text.as_str(), row.label.as_str()]);
                }
                let confidence = view
                    .confidence_code
                    .as_deref()
                    .map(sfm_domain::confidence_label)
                    .unwrap_or(sfm_domain::CONFIDENCE_PLACEHOLDER);
                Ok(format!(
                    "{}\nField confidence: {}",
                    self.table(builder),
                    confidence
                ))
            }
        }
    }

    /// Format a version history.
    pub fn format_versions(&self, view: &VersionTableView) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = view
                    .rows
                    .iter()
                    .map(|r| {
                        json!({
                            "id": r.id,
                            "value": r.value,
                            "sources": r.sources,
                            "lang": r.language,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(ids(view.rows.iter().map(|r| r.id.as_str()))),
            OutputFormat::Table => {
                if view.rows.is_empty() {
                    return Ok(self.colorize("No versions found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Value", "Sources", "Language"]);
                for row in &view.rows {
                    builder.push_record([
                        row.id.as_str(),
                        row.value.as_str(),
                        row.sources.as_str(),
                        row.language.as_str(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a translation list.
    pub fn format_translations(&self, view: &TranslationListView) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = view
                    .rows
                    .iter()
                    .map(|t| json!({"lang": t.language, "value": t.value}))
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(ids(view.rows.iter().map(|t| t.language.as_str()))),
            OutputFormat::Table => {
                if view.rows.is_empty() {
                    return Ok(self.colorize("No translations found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Language", "Value"]);
                for row in &view.rows {
                    builder.push_record([row.language.as_str(), row.value.as_str()]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format language suggestions.
    pub fn format_suggestions(&self, suggestions: &[LanguageSuggestion]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = suggestions
                    .iter()
                    .map(|s| json!({"label": s.label, "value": s.value}))
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(ids(suggestions.iter().map(|s| s.value.as_str()))),
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    return Ok(self.colorize("No matching languages.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Language", "Code"]);
                for s in suggestions {
                    builder.push_record([s.label.as_str(), s.value.as_str()]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format search results.
    pub fn format_search(&self, results: &SearchResults) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "success": results.success,
                "result_number": results.result_number,
                "keys": results.keys,
                "objects": results.objects,
            }))?),
            OutputFormat::Quiet => Ok(results.ids().join("\n")),
            OutputFormat::Table => {
                if results.objects.is_empty() {
                    return Ok(self.colorize("No results found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(results.keys.iter().map(String::as_str));
                for row in results.rows() {
                    builder.push_record(row);
                }
                Ok(format!(
                    "{}\n{} result(s)",
                    self.table(builder),
                    results.result_number
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an inline field error.
    pub fn field_error(&self, field: &str, message: &str) -> String {
        format!("{}: {}", self.colorize(field, "cyan"), self.colorize(message, "red"))
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

//! List views rendered into the modal body
//!
//! Each editor turns the current entry into a view value; the view can be
//! inspected row by row or written out as the HTML fragment that replaces
//! the modal's list element. Building a view never touches the store, so
//! rendering twice in a row yields the same output.

use crate::{ProvenanceEntry, SourceCitation, Translation, VersionRecord};
use std::fmt::Write as _;

/// One row of the source list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Citation id, used as the delete button id
    pub id: String,
    /// Citation text
    pub text: String,
    /// Confidence label
    pub label: String,
}

/// Rendered source list plus the field confidence for the select control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceListView {
    /// Rows in entry order
    pub rows: Vec<SourceRow>,
    /// Selected confidence code, if any
    pub confidence_code: Option<String>,
}

impl SourceListView {
    /// Build the view from an entry
    pub fn from_entry(entry: &ProvenanceEntry) -> Self {
        Self {
            rows: entry.sources.iter().map(source_row).collect(),
            confidence_code: entry.confidence.code().map(str::to_string),
        }
    }

    /// HTML for the `.sources_list` element
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            let _ = write!(
                html,
                "<li><p class=\"src_name\">{}</p><p class=\"src_conf\">{}</p>\
                 <p class=\"src_del\" id=\"{}\"><span title=\"Delete Source\"></span></p></li>",
                escape(&row.text),
                escape(&row.label),
                escape(&row.id),
            );
        }
        html
    }
}

fn source_row(citation: &SourceCitation) -> SourceRow {
    SourceRow {
        id: citation.id.to_string(),
        text: citation.text.clone(),
        label: citation.confidence.label().to_string(),
    }
}

/// One row of the version table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    /// Version id, used as the revert button id
    pub id: String,
    /// Value at that version
    pub value: String,
    /// Comma-separated source texts
    pub sources: String,
    /// Language of the value
    pub language: String,
}

/// Rendered version table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionTableView {
    /// Rows in server order
    pub rows: Vec<VersionRow>,
}

impl VersionTableView {
    /// Build the view from a version list
    pub fn from_versions(versions: &[VersionRecord]) -> Self {
        Self {
            rows: versions
                .iter()
                .map(|v| VersionRow {
                    id: v.id.clone(),
                    value: v.value.clone(),
                    sources: v
                        .sources
                        .iter()
                        .map(|s| s.text.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    language: v.language.clone(),
                })
                .collect(),
        }
    }

    /// HTML for the `.versions_list` element
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            let _ = write!(
                html,
                "<li><p class=\"ver_vers\">{}</p><p class=\"ver_src-conf\">{}</p>\
                 <p class=\"ver_rev\" id=\"{}\"><span title=\"Revert\"></span></p></li>",
                escape(&row.value),
                escape(&row.sources),
                escape(&row.id),
            );
        }
        html
    }
}

/// Rendered translation list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationListView {
    /// `(language, value)` rows
    pub rows: Vec<Translation>,
}

impl TranslationListView {
    /// Build the view from a translation list
    pub fn from_translations(translations: &[Translation]) -> Self {
        Self {
            rows: translations.to_vec(),
        }
    }

    /// HTML for the `.languages_list` element
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            let _ = write!(
                html,
                "<li><p class=\"lang_name\">{}</p><p class=\"lang_trans\">{}</p></li>",
                escape(&row.language),
                escape(&row.value),
            );
        }
        html
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Confidence, SourceId};
    use proptest::prelude::*;

    #[test]
    fn test_source_rows() {
        let mut entry = ProvenanceEntry::new();
        entry.add_source(SourceCitation::new(
            SourceId::Server("5".into()),
            "Report A",
            Confidence::Medium,
        ));
        entry.add_source(SourceCitation::new(SourceId::Temporary(0), "Draft", Confidence::Unset));

        let view = SourceListView::from_entry(&entry);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, "5");
        assert_eq!(view.rows[0].label, "Medium");
        assert_eq!(view.rows[1].id, "_0");
        assert_eq!(view.rows[1].label, "Def");
        assert!(view.confidence_code.is_none());
    }

    #[test]
    fn test_html_is_escaped() {
        let mut entry = ProvenanceEntry::new();
        entry.add_source(SourceCitation::new(
            SourceId::Server("1".into()),
            "<script>\"x\"</script>",
            Confidence::Low,
        ));
        let html = SourceListView::from_entry(&entry).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;"));
    }

    #[test]
    fn test_version_rows_keep_server_order() {
        let versions = vec![
            VersionRecord {
                id: "12".into(),
                value: "new".into(),
                sources: vec![SourceCitation::new(SourceId::Server("1".into()), "A", Confidence::Low)],
                language: "en".into(),
            },
            VersionRecord {
                id: "3".into(),
                value: "old".into(),
                sources: vec![],
                language: "en".into(),
            },
        ];
        let view = VersionTableView::from_versions(&versions);
        let ids: Vec<_> = view.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "3"]);
        assert_eq!(view.rows[0].sources, "A");
    }

    #[test]
    fn test_empty_views_render_nothing() {
        assert_eq!(SourceListView::default().to_html(), "");
        assert_eq!(VersionTableView::default().to_html(), "");
        assert_eq!(TranslationListView::default().to_html(), "");
    }

    proptest! {
        #[test]
        fn prop_render_is_idempotent(texts in proptest::collection::vec("\\PC{0,12}", 0..6)) {
            let mut entry = ProvenanceEntry::new();
            for (i, t) in texts.iter().enumerate() {
                entry.add_source(SourceCitation::new(SourceId::Temporary(i as u64), t.clone(), Confidence::High));
            }
            let first = SourceListView::from_entry(&entry);
            let second = SourceListView::from_entry(&entry);
            prop_assert_eq!(first.rows.len(), texts.len());
            prop_assert_eq!(first.to_html(), second.to_html());
            prop_assert_eq!(first, second);
        }
    }
}

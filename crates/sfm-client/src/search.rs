//! Search results pager for the record listing pages.
//!
//! The listing keeps its filter, ordering and page in the URL fragment
//! (`#name=juan&orderby=name&order=DESC&page=2`) and mirrors them as query
//! parameters to `{path}search/`.

use crate::wire::{scalar_to_string, SearchResponse};
use serde_json::{Map, Value};

/// Fragment key that is never treated as a parameter
const IGNORED_KEY: &str = "clean";

/// Sort direction values used by the listing
pub const ORDER_ASC: &str = "ASC";
/// Sort direction values used by the listing
pub const ORDER_DESC: &str = "DESC";

/// Search parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
}

impl SearchQuery {
    /// Empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL fragment, with or without the leading `#`
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut query = Self::new();
        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            if key.is_empty() || key == IGNORED_KEY {
                continue;
            }
            query.set(key.into_owned(), value.into_owned());
        }
        query
    }

    /// Encode the parameters as a fragment (without the `#`)
    pub fn to_fragment(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Parameters as sent to the search endpoint
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a parameter, keeping its position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key, value)),
        }
    }

    /// Handle a click on a sortable column header.
    ///
    /// Clicking the current column flips `DESC` to `ASC` and anything else
    /// back to `DESC`; clicking another column sorts it `DESC`.
    pub fn toggle_order(&mut self, column: &str) {
        if self.get("orderby") == Some(column) {
            let next = if self.get("order") == Some(ORDER_DESC) {
                ORDER_ASC
            } else {
                ORDER_DESC
            };
            self.set("order", next);
        } else {
            self.set("orderby", column);
            self.set("order", ORDER_DESC);
        }
    }

    /// Jump to a result page
    pub fn set_page(&mut self, page: u32) {
        self.set("page", page.to_string());
    }
}

/// Rows of a search response, ready for display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Whether the backend ran the query
    pub success: bool,
    /// Column keys in display order
    pub keys: Vec<String>,
    /// Result objects
    pub objects: Vec<Map<String, Value>>,
    /// Pre-rendered paginator HTML
    pub paginator: String,
    /// Result count as displayed
    pub result_number: String,
}

impl SearchResults {
    /// One cell vector per object, in `keys` order. Missing cells are empty.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.objects
            .iter()
            .map(|object| {
                self.keys
                    .iter()
                    .map(|key| object.get(key).and_then(scalar_to_string).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Id of each row's object, used for the row link
    pub fn ids(&self) -> Vec<String> {
        self.objects
            .iter()
            .map(|object| object.get("id").and_then(scalar_to_string).unwrap_or_default())
            .collect()
    }
}

impl From<SearchResponse> for SearchResults {
    fn from(response: SearchResponse) -> Self {
        Self {
            success: response.success,
            keys: response.keys,
            objects: response.objects,
            paginator: response.paginator,
            result_number: scalar_to_string(&response.result_number).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fragment_parsing() {
        let query = SearchQuery::from_fragment("#name=Juan%20P%C3%A9rez&clean&country=mx");
        assert_eq!(query.get("name"), Some("Juan Pérez"));
        assert_eq!(query.get("country"), Some("mx"));
        assert_eq!(query.get("clean"), None);
        assert_eq!(query.params().len(), 2);
    }

    #[test]
    fn test_empty_fragment() {
        assert!(SearchQuery::from_fragment("").params().is_empty());
        assert!(SearchQuery::from_fragment("#").params().is_empty());
    }

    #[test]
    fn test_set_keeps_position() {
        let mut query = SearchQuery::from_fragment("a=1&b=2");
        query.set("a", "3");
        query.set_page(4);
        assert_eq!(query.to_fragment(), "a=3&b=2&page=4");
    }

    #[test]
    fn test_toggle_order() {
        let mut query = SearchQuery::new();

        query.toggle_order("name");
        assert_eq!(query.get("orderby"), Some("name"));
        assert_eq!(query.get("order"), Some("DESC"));

        query.toggle_order("name");
        assert_eq!(query.get("order"), Some("ASC"));

        query.toggle_order("name");
        assert_eq!(query.get("order"), Some("DESC"));

        query.toggle_order("country");
        assert_eq!(query.get("orderby"), Some("country"));
        assert_eq!(query.get("order"), Some("DESC"));
    }

    #[test]
    fn test_rows_follow_keys() {
        let response: SearchResponse = serde_json::from_value(json!({
            "success": true,
            "objects": [
                {"id": 3, "name": "Juan", "country": "mx"},
                {"id": 4, "name": "Ana"}
            ],
            "keys": ["name", "country"],
            "paginator": "<ul></ul>",
            "result_number": 2
        }))
        .unwrap();

        let results = SearchResults::from(response);
        assert!(results.success);
        assert_eq!(results.result_number, "2");
        assert_eq!(
            results.rows(),
            vec![
                vec!["Juan".to_string(), "mx".to_string()],
                vec!["Ana".to_string(), String::new()],
            ]
        );
        assert_eq!(results.ids(), vec!["3", "4"]);
    }
}

//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sfm_client::{ClientConfig, HttpBackend, SearchQuery};

/// Execute the search command.
pub async fn execute_search(
    args: SearchArgs,
    client: &ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    let query = build_query(&args)?;
    let backend = HttpBackend::new(client.clone())?;
    let results = backend.search(&args.path, &query).await?;

    if !results.success {
        println!("{}", formatter.warning("The search did not run"));
    }
    println!("{}", formatter.format_search(&results)?);
    if !query.params().is_empty() {
        println!("{}", formatter.info(&format!("#{}", query.to_fragment())));
    }
    Ok(())
}

/// Turn the command arguments into listing parameters
fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    if !args.path.starts_with('/') {
        return Err(CliError::InvalidInput(format!(
            "search path must start with '/', got '{}'",
            args.path
        )));
    }

    let mut query = SearchQuery::from_fragment(&args.fragment);
    if let Some(column) = &args.order_by {
        query.toggle_order(column);
    }
    if let Some(page) = args.page {
        query.set_page(page);
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(fragment: &str, order_by: Option<&str>) -> SearchArgs {
        SearchArgs {
            path: "/en/person/".to_string(),
            fragment: fragment.to_string(),
            order_by: order_by.map(str::to_string),
            page: None,
        }
    }

    #[test]
    fn test_order_toggles_from_fragment() {
        let query = build_query(&args("#orderby=name&order=DESC", Some("name"))).unwrap();
        assert_eq!(query.get("order"), Some("ASC"));

        let query = build_query(&args("#orderby=name&order=ASC", Some("country"))).unwrap();
        assert_eq!(query.get("orderby"), Some("country"));
        assert_eq!(query.get("order"), Some("DESC"));
    }

    #[test]
    fn test_page_is_appended() {
        let mut a = args("#name=Juan", None);
        a.page = Some(3);
        let query = build_query(&a).unwrap();
        assert_eq!(query.to_fragment(), "name=Juan&page=3");
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let mut a = args("", None);
        a.path = "en/person".to_string();
        assert!(build_query(&a).is_err());
    }
}

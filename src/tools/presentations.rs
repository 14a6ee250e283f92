//! Presentation query tools backed by the in-memory store.
//!
//! The catalog is fixed at startup: exactly the two tools below, assembled
//! by explicit registration with the store injected into each handler. The
//! `get_PresentationsByYear` casing is part of the existing wire contract
//! and is kept verbatim.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ToolError;
use crate::store::{Presentation, PresentationStore};

use super::schema::{FieldType, InputSchema};
use super::{ToolContent, ToolDescriptor, ToolRegistry};

/// Name of the list-all tool.
pub const GET_PRESENTATIONS: &str = "get_presentations";

/// Name of the filter-by-year tool.
pub const GET_PRESENTATIONS_BY_YEAR: &str = "get_PresentationsByYear";

/// Builds the registry with the full tool catalog over `store`.
///
/// # Errors
///
/// Returns [`ToolError::DuplicateTool`] if the catalog contains a name
/// collision (a programming error in the catalog itself).
pub fn build_registry(store: Arc<PresentationStore>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();

    let all = Arc::clone(&store);
    registry.register(ToolDescriptor::new(
        GET_PRESENTATIONS,
        "Get a list of all presentations from JavaOne",
        InputSchema::new().required("operation", FieldType::String, "Operation to perform"),
        move |_arguments| Ok(render(all.list())),
    ))?;

    registry.register(ToolDescriptor::new(
        GET_PRESENTATIONS_BY_YEAR,
        "Get presentations from JavaOne filtered by year",
        InputSchema::new()
            .required(
                "operation",
                FieldType::String,
                "Operation to perform (e.g. 'list')",
            )
            .optional(
                "year",
                FieldType::Integer,
                "Year to filter presentations (optional)",
            ),
        move |arguments| {
            // An absent year returns the full archive rather than failing.
            arguments.get("year").and_then(Value::as_i64).map_or_else(
                || Ok(render(store.list())),
                |year| Ok(render(store.list_by_year(year))),
            )
        },
    ))?;

    Ok(registry)
}

/// Serialises records into text content items, one per record.
fn render<'a, I>(records: I) -> Vec<ToolContent>
where
    I: IntoIterator<Item = &'a Presentation>,
{
    records
        .into_iter()
        .map(|record| ToolContent::text(record.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn talk(title: &str, year: i64) -> Presentation {
        Presentation {
            title: title.to_string(),
            url: format!("https://javaone.example/{year}/talk"),
            year,
        }
    }

    fn registry_over(records: Vec<Presentation>) -> ToolRegistry {
        build_registry(Arc::new(PresentationStore::new(records))).unwrap()
    }

    #[test]
    fn catalog_contains_exactly_the_two_tools() {
        let registry = registry_over(vec![]);
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup(GET_PRESENTATIONS).is_ok());
        assert!(registry.lookup(GET_PRESENTATIONS_BY_YEAR).is_ok());
    }

    #[test]
    fn get_presentations_returns_one_item_per_record() {
        let registry = registry_over(vec![talk("a", 2023), talk("b", 2024)]);
        let result = registry.call(GET_PRESENTATIONS, &json!({"operation": "list"}));

        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("a (2023)"));
    }

    #[test]
    fn get_presentations_over_empty_store_is_empty_success() {
        let registry = registry_over(vec![]);
        let result = registry.call(GET_PRESENTATIONS, &json!({"operation": "list"}));

        assert!(!result.is_error);
        assert!(result.content.is_empty());
    }

    #[test]
    fn by_year_filters_on_exact_match() {
        let registry = registry_over(vec![talk("a", 2023), talk("b", 2024), talk("c", 2024)]);
        let result = registry.call(
            GET_PRESENTATIONS_BY_YEAR,
            &json!({"operation": "list", "year": 2024}),
        );

        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);
        for item in &result.content {
            let ToolContent::Text { text } = item;
            assert!(text.contains("(2024)"));
        }
    }

    #[test]
    fn by_year_without_year_returns_all_records() {
        let registry = registry_over(vec![talk("a", 2023), talk("b", 2024)]);
        let result = registry.call(GET_PRESENTATIONS_BY_YEAR, &json!({"operation": "list"}));

        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);
    }

    #[test]
    fn by_year_requires_operation_field() {
        let registry = registry_over(vec![talk("a", 2023)]);
        let result = registry.call(GET_PRESENTATIONS_BY_YEAR, &json!({"year": 2023}));

        assert!(result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("operation"));
    }

    #[test]
    fn by_year_rejects_non_integer_year() {
        let registry = registry_over(vec![talk("a", 2023)]);
        let result = registry.call(
            GET_PRESENTATIONS_BY_YEAR,
            &json!({"operation": "list", "year": "2023"}),
        );

        assert!(result.is_error);
    }
}

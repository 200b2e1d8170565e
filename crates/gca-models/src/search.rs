//! Search request and response shapes.
//!
//! These are data containers only: nothing in this crate performs a search.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::validation::{constraint_violations, FieldIssue, Record, ValidationError};

/// Filters that can be applied to a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct SearchFilters {
    /// Search radius in kilometers from the target location.
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub radius: Option<f64>,

    /// Preferred contract type such as permanent, temporary, or apprenticeship.
    #[serde(default)]
    pub contract: Option<String>,

    /// Desired seniority, qualification, or apprenticeship level filter.
    #[serde(default)]
    pub level: Option<String>,

    /// Additional free-form keywords to refine the search results.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Record for SearchFilters {
    fn violations(&self) -> Vec<FieldIssue> {
        constraint_violations(self.validate())
    }
}

/// A structured request for discovering opportunities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    /// Primary free-text query for the search.
    pub query: String,

    /// Location string to anchor the search, such as a city or postal code.
    #[serde(default)]
    pub location: Option<String>,

    /// Optional filters applied to shape the search results.
    #[serde(default)]
    #[validate(nested)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Create an unfiltered request for `query`.
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        Self {
            query: query.into(),
            location: None,
            filters: SearchFilters::default(),
        }
        .validated()
    }
}

impl Record for SearchRequest {
    fn violations(&self) -> Vec<FieldIssue> {
        constraint_violations(self.validate())
    }
}

/// Result counts contributed by one upstream data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceBreakdown {
    /// Identifier of the upstream data provider.
    pub source: String,

    /// Number of results contributed by the provider.
    #[serde(default)]
    pub count: u64,
}

impl SourceBreakdown {
    pub fn new(source: impl Into<String>, count: u64) -> Self {
        Self {
            source: source.into(),
            count,
        }
    }
}

impl Record for SourceBreakdown {
    // The unsigned count is the only constraint and decoding enforces it.
    fn violations(&self) -> Vec<FieldIssue> {
        Vec::new()
    }
}

/// Search results of a single resource type.
///
/// `total` is the number of matches upstream and is independent of how many
/// `items` this page carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchResponse<T> {
    /// Collection of resources that satisfy the search request.
    #[serde(default = "Vec::<T>::new")]
    #[schemars(default = "no_items")]
    pub items: Vec<T>,

    /// Total number of resources available for the provided query and filters.
    #[serde(default)]
    pub total: u64,

    /// Breakdown of result counts grouped by source provider.
    #[serde(default)]
    pub source_breakdown: Vec<SourceBreakdown>,

    /// Optional diagnostic metadata useful for debugging searches.
    #[serde(default)]
    pub debug: Option<BTreeMap<String, Value>>,
}

fn no_items() -> Vec<Value> {
    Vec::new()
}

impl<T> Default for SearchResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            source_breakdown: Vec::new(),
            debug: None,
        }
    }
}

impl<T: Record> SearchResponse<T> {
    /// Create a response page. Every item is re-checked against its own constraints.
    pub fn new(
        items: Vec<T>,
        total: u64,
        source_breakdown: Vec<SourceBreakdown>,
    ) -> Result<Self, ValidationError> {
        Self {
            items,
            total,
            source_breakdown,
            debug: None,
        }
        .validated()
    }
}

impl<T: Record> Record for SearchResponse<T> {
    fn record_name() -> String {
        format!("SearchResponse[{}]", T::record_name())
    }

    fn violations(&self) -> Vec<FieldIssue> {
        let items = self.items.iter().enumerate().flat_map(|(index, item)| {
            let prefix = format!("items[{index}]");
            item.violations()
                .into_iter()
                .map(move |issue| issue.nested_under(&prefix))
        });

        let breakdown = self
            .source_breakdown
            .iter()
            .enumerate()
            .flat_map(|(index, entry)| {
                let prefix = format!("source_breakdown[{index}]");
                entry
                    .violations()
                    .into_iter()
                    .map(move |issue| issue.nested_under(&prefix))
            });

        items.chain(breakdown).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{ApprenticeshipPosting, JobPosting};
    use crate::validation::IssueKind;
    use serde_json::json;

    fn search_request_data() -> Value {
        json!({
            "query": "solar engineer",
            "location": "Manchester, UK",
            "filters": {
                "radius": 25.0,
                "contract": "permanent",
                "level": "mid",
                "keywords": ["solar", "photovoltaic"]
            }
        })
    }

    fn job() -> JobPosting {
        JobPosting::new(
            "job-123",
            "Sustainability Analyst",
            "Green Future Ltd",
            "London, UK",
            "https://example.com/jobs/job-123",
            "example-board",
        )
        .unwrap()
    }

    #[test]
    fn test_search_request_nested_filters() {
        let request = SearchRequest::from_value(search_request_data()).unwrap();

        assert!((request.filters.radius.unwrap() - 25.0).abs() < f64::EPSILON);
        assert_eq!(request.filters.keywords, vec!["solar", "photovoltaic"]);
        assert_eq!(serde_json::to_value(&request).unwrap(), search_request_data());
    }

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::from_json(r#"{"query": "wind technician"}"#).unwrap();

        assert!(request.location.is_none());
        assert_eq!(request.filters, SearchFilters::default());
        assert_eq!(SearchRequest::new("wind technician").unwrap(), request);
    }

    #[test]
    fn test_search_request_requires_query() {
        let err = SearchRequest::from_value(json!({"location": "Leeds"})).unwrap_err();
        assert_eq!(err.issue_for("query").unwrap().kind, IssueKind::Missing);

        let err = SearchRequest::from_value(json!({"query": null})).unwrap_err();
        assert_eq!(err.issue_for("query").unwrap().kind, IssueKind::InvalidType);
    }

    #[test]
    fn test_search_filters_radius_bounds() {
        for radius in [0.0, 0.5, 250.0] {
            assert!(SearchFilters::from_value(json!({ "radius": radius })).is_ok());
        }

        let err = SearchFilters::from_value(json!({ "radius": -1 })).unwrap_err();
        let issue = err.issue_for("radius").unwrap();
        assert_eq!(issue.kind, IssueKind::Constraint);
        assert_eq!(issue.code.as_deref(), Some("range"));
    }

    #[test]
    fn test_negative_radius_is_reported_through_request() {
        let mut data = search_request_data();
        data["filters"]["radius"] = json!(-1.0);

        let err = SearchRequest::from_value(data).unwrap_err();
        assert_eq!(err.fields(), vec!["filters.radius"]);
    }

    #[test]
    fn test_unknown_nested_filter_is_rejected() {
        let mut data = search_request_data();
        data["filters"]["salary_min"] = json!(30000);

        let err = SearchRequest::from_value(data).unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::UnknownField);
        assert_eq!(err.issues()[0].path, "filters.salary_min");
    }

    #[test]
    fn test_source_breakdown_count() {
        let breakdown = SourceBreakdown::from_value(json!({"source": "s"})).unwrap();
        assert_eq!(breakdown.count, 0);

        let err = SourceBreakdown::from_value(json!({"source": "s", "count": -1})).unwrap_err();
        assert_eq!(err.issue_for("count").unwrap().kind, IssueKind::InvalidValue);
    }

    #[test]
    fn test_search_response_generic() {
        let response =
            SearchResponse::new(vec![job()], 1, vec![SourceBreakdown::new("example-board", 1)])
                .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(response.items[0].id, "job-123");
        assert_eq!(response.source_breakdown[0].count, 1);
    }

    #[test]
    fn test_search_response_total_is_independent_of_items() {
        let response = SearchResponse::new(vec![job()], 250, Vec::new()).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.total, 250);

        let empty = SearchResponse::<JobPosting>::from_value(json!({})).unwrap();
        assert_eq!(empty, SearchResponse::default());
    }

    #[test]
    fn test_search_response_item_errors_carry_index() {
        let payload = json!({
            "items": [
                {"id": "c1", "title": "t", "provider": "p", "url": "https://example.com/c1"},
                {"id": "c2", "title": "t", "provider": "p", "url": "bad"}
            ],
            "total": 2
        });

        let err = SearchResponse::<crate::Course>::from_value(payload).unwrap_err();
        assert_eq!(err.fields(), vec!["items[1].url"]);
        assert_eq!(err.record(), "SearchResponse[Course]");
    }

    #[test]
    fn test_search_response_from_empty_payload() {
        let response = SearchResponse::<crate::Course>::from_value(json!({})).unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.total, 0);
        assert!(response.source_breakdown.is_empty());
        assert!(response.debug.is_none());
    }

    #[test]
    fn test_search_response_record_name() {
        assert_eq!(SearchResponse::<JobPosting>::record_name(), "SearchResponse[JobPosting]");
        assert_eq!(
            SearchResponse::<ApprenticeshipPosting>::record_name(),
            "SearchResponse[ApprenticeshipPosting]"
        );
    }

    #[test]
    fn test_search_response_rejects_invalid_code_built_items() {
        let broken = JobPosting {
            url: "nope".to_string(),
            ..job()
        };
        let err = SearchResponse::new(vec![job(), broken], 2, Vec::new()).unwrap_err();
        assert_eq!(err.fields(), vec!["items[1].url"]);
    }

    #[test]
    fn test_search_response_debug_map_round_trips() {
        let payload = json!({
            "items": [],
            "total": 0,
            "source_breakdown": [{"source": "find-a-job", "count": 0}],
            "debug": {"latency_ms": 12, "providers": ["find-a-job"]}
        });

        let response = SearchResponse::<ApprenticeshipPosting>::from_value(payload.clone()).unwrap();
        assert_eq!(response.debug.as_ref().unwrap()["latency_ms"], json!(12));
        assert_eq!(serde_json::to_value(&response).unwrap(), payload);
    }
}

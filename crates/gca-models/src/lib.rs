//! Domain models for the Green Career Agent.
//!
//! This crate provides validated, Serde-serializable record types for:
//! - Job and apprenticeship postings
//! - Courses
//! - Search requests and generic search responses
//!
//! and a JSON Schema exporter for all of them.

pub mod course;
pub mod job;
pub mod schema;
pub mod search;
pub mod timestamp;
pub mod validation;

// Re-export common types
pub use course::Course;
pub use job::{ApprenticeshipPosting, JobPosting};
pub use schema::{build_schema, write_schema, SchemaDocument, SchemaError, SCHEMA_MODELS};
pub use search::{SearchFilters, SearchRequest, SearchResponse, SourceBreakdown};
pub use timestamp::Timestamp;
pub use validation::{FieldIssue, IssueKind, Record, ValidationError};

//! Educational courses relevant to career development.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{constraint_violations, http_url, FieldIssue, Record, ValidationError};

/// Delivery mode assumed when none is given.
pub const DEFAULT_COURSE_MODE: &str = "in-person";

/// A course offered by a training organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct Course {
    /// Unique identifier for the course.
    pub id: String,

    /// Official course title.
    pub title: String,

    /// Organization delivering the course.
    pub provider: String,

    /// Delivery mode such as in-person, online, or hybrid.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Duration or time commitment summary for the course.
    #[serde(default)]
    pub duration: Option<String>,

    /// Location where the course is offered, if applicable.
    #[serde(default)]
    pub location: Option<String>,

    /// URL with detailed course information and enrollment instructions.
    #[validate(custom(function = "http_url"))]
    #[schemars(url)]
    pub url: String,

    /// Start date for the next available course cohort when known.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_mode() -> String {
    DEFAULT_COURSE_MODE.to_string()
}

impl Course {
    /// Create a course from its required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        provider: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self {
            id: id.into(),
            title: title.into(),
            provider: provider.into(),
            mode: default_mode(),
            duration: None,
            location: None,
            url: url.into(),
            start_date: None,
        }
        .validated()
    }
}

impl Record for Course {
    fn violations(&self) -> Vec<FieldIssue> {
        constraint_violations(self.validate())
    }
}

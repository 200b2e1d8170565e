//! Construction-time validation for record types.
//!
//! Records are built through [`Record`]: the field mapping is decoded first
//! (required fields, unknown fields, type coercion) and the record's declared
//! constraints run afterwards. Every failure is reported as a [`FieldIssue`]
//! naming the offending field path, collected into a [`ValidationError`].

use std::borrow::Cow;
use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use serde_path_to_error::Segment;
use thiserror::Error;
use url::Url;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Category of a single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field was absent
    Missing,
    /// A field not declared by the record was supplied
    UnknownField,
    /// The value could not be coerced to the declared type
    InvalidType,
    /// The value has the right type but is out of range for it
    InvalidValue,
    /// A declared constraint (numeric bound, URL shape) failed
    Constraint,
    /// The input was not a JSON document at all
    MalformedDocument,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::UnknownField => "unknown_field",
            IssueKind::InvalidType => "invalid_type",
            IssueKind::InvalidValue => "invalid_value",
            IssueKind::Constraint => "constraint",
            IssueKind::MalformedDocument => "malformed_document",
        }
    }
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted field path, with `[i]` for list positions. Empty for the record itself.
    pub path: String,

    pub kind: IssueKind,

    /// Constraint rule code (`range`, `url`) for constraint failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Create a constraint failure with its rule code.
    pub fn constraint(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: IssueKind::Constraint,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Re-root this issue under `prefix` (used for nested and listed records).
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.path = if self.path.is_empty() {
            prefix.to_string()
        } else if self.path.starts_with('[') {
            format!("{prefix}{}", self.path)
        } else {
            join_path(prefix, &self.path)
        };
        self
    }
}

/// A record failed construction.
///
/// Carries every field issue found; the record is never partially built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation error(s) for {record}: {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    record: String,
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Create an error for `record`. Issues are ordered by field path.
    pub fn new(record: impl Into<String>, mut issues: Vec<FieldIssue>) -> Self {
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            record: record.into(),
            issues,
        }
    }

    /// `Ok(())` when there are no issues, otherwise the error.
    pub fn from_issues(record: impl Into<String>, issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self::new(record, issues))
        }
    }

    /// Name of the record type that failed.
    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    /// Paths of every failed field.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.path.as_str()).collect()
    }

    /// Find the issue reported for `path`, if any.
    pub fn issue_for(&self, path: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            let path = if issue.path.is_empty() { "<root>" } else { &issue.path };
            format!("{path}: {}", issue.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A validated record type.
///
/// Construction goes through [`Record::from_value`] or [`Record::from_json`],
/// or through [`Record::validated`] for values assembled in code. A value
/// returned from any of these satisfies every declared constraint.
pub trait Record: Serialize + DeserializeOwned + JsonSchema + Sized {
    /// Run every declared constraint and return all violations.
    fn violations(&self) -> Vec<FieldIssue>;

    /// Name used in errors and in the exported schema document.
    fn record_name() -> String {
        Self::schema_name()
    }

    /// Check the declared constraints.
    fn check(&self) -> Result<(), ValidationError> {
        ValidationError::from_issues(Self::record_name(), self.violations())
    }

    /// Return `self` if it satisfies every constraint.
    fn validated(self) -> Result<Self, ValidationError> {
        self.check()?;
        Ok(self)
    }

    /// Build a record from a field mapping.
    fn from_value(value: Value) -> Result<Self, ValidationError> {
        let record: Self = serde_path_to_error::deserialize(value)
            .map_err(|err| ValidationError::new(Self::record_name(), vec![decode_issue(err)]))?;
        record.validated()
    }

    /// Build a record from a JSON document.
    fn from_json(input: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(input).map_err(|err| {
            ValidationError::new(
                Self::record_name(),
                vec![FieldIssue::new("", IssueKind::MalformedDocument, err.to_string())],
            )
        })?;
        Self::from_value(value)
    }
}

/// Check that `value` is an absolute `http` or `https` URL.
pub fn http_url(value: &str) -> Result<(), validator::ValidationError> {
    let parsed = Url::parse(value).map_err(|err| url_error(format!("invalid URL: {err}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(url_error(format!(
            "URL scheme should be 'http' or 'https', got '{other}'"
        ))),
    }
}

fn url_error(message: String) -> validator::ValidationError {
    validator::ValidationError::new("url").with_message(Cow::Owned(message))
}

/// Flatten the result of a `validator` run into field issues.
pub(crate) fn constraint_violations(result: Result<(), ValidationErrors>) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if let Err(errors) = result {
        collect_constraint_issues("", &errors, &mut issues);
    }
    issues
}

fn collect_constraint_issues(prefix: &str, errors: &ValidationErrors, issues: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let field: &str = field.as_ref();
        let path = join_path(prefix, field);

        match kind {
            ValidationErrorsKind::Field(failures) => {
                issues.extend(failures.iter().map(|failure| constraint_issue(&path, failure)));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_constraint_issues(&path, nested, issues);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_constraint_issues(&format!("{path}[{index}]"), nested, issues);
                }
            }
        }
    }
}

fn constraint_issue(path: &str, failure: &validator::ValidationError) -> FieldIssue {
    let message = match &failure.message {
        Some(message) => message.to_string(),
        None => describe_rule(failure),
    };
    FieldIssue::constraint(path, failure.code.to_string(), message)
}

fn describe_rule(failure: &validator::ValidationError) -> String {
    match (&*failure.code, failure.params.get("min")) {
        ("range", Some(min)) => format!("must be greater than or equal to {min}"),
        (code, _) => format!("failed the '{code}' constraint"),
    }
}

/// Translate a decode failure into a field issue.
fn decode_issue(err: serde_path_to_error::Error<serde_json::Error>) -> FieldIssue {
    let location = render_path(err.path());
    let message = err.into_inner().to_string();

    if let Some(field) = backticked(&message, "missing field `") {
        return FieldIssue::new(join_path(&location, field), IssueKind::Missing, "field required");
    }

    if let Some(field) = backticked(&message, "unknown field `") {
        let path = if location == field || location.ends_with(&format!(".{field}")) {
            location
        } else {
            join_path(&location, field)
        };
        return FieldIssue::new(path, IssueKind::UnknownField, "extra fields not permitted");
    }

    // Anything past the type check (bad dates, out-of-range numbers) is a value problem
    let kind = if message.starts_with("invalid type") {
        IssueKind::InvalidType
    } else {
        IssueKind::InvalidValue
    };
    FieldIssue::new(location, kind, message)
}

fn render_path(path: &serde_path_to_error::Path) -> String {
    let mut rendered = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => {
                let _ = write!(rendered, "[{index}]");
            }
            Segment::Map { key } => rendered = join_path(&rendered, key),
            _ => {}
        }
    }
    rendered
}

fn backticked<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = message.strip_prefix(prefix)?;
    rest.split('`').next()
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

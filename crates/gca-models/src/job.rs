//! Job and apprenticeship postings sourced from external job boards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::timestamp::Timestamp;
use crate::validation::{constraint_violations, http_url, FieldIssue, Record, ValidationError};

/// A single job posting sourced from an external provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobPosting {
    /// Unique identifier for the job posting.
    pub id: String,

    /// Job title or role name.
    pub title: String,

    /// Name of the hiring organization.
    pub employer: String,

    /// Primary location of the job opportunity.
    pub location: String,

    /// Salary or compensation description when available.
    #[serde(default)]
    pub salary: Option<String>,

    /// Canonical URL to the job posting detail page.
    #[validate(custom(function = "http_url"))]
    #[schemars(url)]
    pub url: String,

    /// Identifier for the system or board providing the job.
    pub source: String,

    /// Timestamp indicating when the job was posted.
    #[serde(default)]
    pub posted_at: Option<Timestamp>,

    /// Full job description including responsibilities and qualifications.
    #[serde(default)]
    pub description: String,

    /// Key skills or keywords associated with the job posting.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobPosting {
    /// Create a posting from its required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        employer: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self {
            id: id.into(),
            title: title.into(),
            employer: employer.into(),
            location: location.into(),
            salary: None,
            url: url.into(),
            source: source.into(),
            posted_at: None,
            description: String::new(),
            skills: Vec::new(),
        }
        .validated()
    }
}

impl Record for JobPosting {
    fn violations(&self) -> Vec<FieldIssue> {
        constraint_violations(self.validate())
    }
}

/// A job posting extended with apprenticeship metadata.
///
/// Carries every [`JobPosting`] field plus the training details, so every
/// posting constraint applies here too. Use [`ApprenticeshipPosting::posting`]
/// or the `From` conversion to get the plain posting back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct ApprenticeshipPosting {
    /// Unique identifier for the job posting.
    pub id: String,

    /// Job title or role name.
    pub title: String,

    /// Name of the hiring organization.
    pub employer: String,

    /// Primary location of the job opportunity.
    pub location: String,

    /// Salary or compensation description when available.
    #[serde(default)]
    pub salary: Option<String>,

    /// Canonical URL to the job posting detail page.
    #[validate(custom(function = "http_url"))]
    #[schemars(url)]
    pub url: String,

    /// Identifier for the system or board providing the job.
    pub source: String,

    /// Timestamp indicating when the job was posted.
    #[serde(default)]
    pub posted_at: Option<Timestamp>,

    /// Full job description including responsibilities and qualifications.
    #[serde(default)]
    pub description: String,

    /// Key skills or keywords associated with the job posting.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Training provider delivering the apprenticeship program.
    pub provider: String,

    /// Apprenticeship level as defined by the awarding body.
    #[serde(default)]
    pub level: Option<String>,

    /// Standard code identifying the apprenticeship framework.
    #[serde(default)]
    pub standard_code: Option<String>,
}

impl ApprenticeshipPosting {
    /// Extend an existing posting with its training provider.
    pub fn from_posting(
        posting: JobPosting,
        provider: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let JobPosting {
            id,
            title,
            employer,
            location,
            salary,
            url,
            source,
            posted_at,
            description,
            skills,
        } = posting;

        Self {
            id,
            title,
            employer,
            location,
            salary,
            url,
            source,
            posted_at,
            description,
            skills,
            provider: provider.into(),
            level: None,
            standard_code: None,
        }
        .validated()
    }

    /// The job posting part of this apprenticeship.
    pub fn posting(&self) -> JobPosting {
        self.clone().into()
    }
}

impl From<ApprenticeshipPosting> for JobPosting {
    fn from(apprenticeship: ApprenticeshipPosting) -> Self {
        Self {
            id: apprenticeship.id,
            title: apprenticeship.title,
            employer: apprenticeship.employer,
            location: apprenticeship.location,
            salary: apprenticeship.salary,
            url: apprenticeship.url,
            source: apprenticeship.source,
            posted_at: apprenticeship.posted_at,
            description: apprenticeship.description,
            skills: apprenticeship.skills,
        }
    }
}

impl Record for ApprenticeshipPosting {
    fn violations(&self) -> Vec<FieldIssue> {
        constraint_violations(self.validate())
    }
}

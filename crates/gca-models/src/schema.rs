//! JSON Schema export for the record types.
//!
//! The registry below is the single list of exported records; generic
//! containers are registered once per instantiation under a distinct name.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{ApprenticeshipPosting, Course, JobPosting, SearchRequest, SearchResponse};

/// Builds the root schema of one registered record.
pub type SchemaFn = fn() -> RootSchema;

/// Registered records, in export order.
pub const SCHEMA_MODELS: &[(&str, SchemaFn)] = &[
    ("JobPosting", root_schema::<JobPosting>),
    ("ApprenticeshipPosting", root_schema::<ApprenticeshipPosting>),
    ("Course", root_schema::<Course>),
    ("SearchRequest", root_schema::<SearchRequest>),
    ("SearchResponse[JobPosting]", root_schema::<SearchResponse<JobPosting>>),
    (
        "SearchResponse[ApprenticeshipPosting]",
        root_schema::<SearchResponse<ApprenticeshipPosting>>,
    ),
    ("SearchResponse[Course]", root_schema::<SearchResponse<Course>>),
];

fn root_schema<T: JsonSchema>() -> RootSchema {
    schema_for!(T)
}

/// Errors writing the schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write schema to {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Schemas of every registered record, keyed by registry name.
///
/// Entries keep registry order; serialization sorts them by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    entries: Vec<(String, RootSchema)>,
}

impl SchemaDocument {
    pub fn get(&self, name: &str) -> Option<&RootSchema> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, schema)| schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The document as JSON, with object keys sorted at every level.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn sorted(&self) -> BTreeMap<&str, &RootSchema> {
        self.entries
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
            .collect()
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}

/// Assemble the schema of every registered record.
pub fn build_schema() -> SchemaDocument {
    let entries = SCHEMA_MODELS
        .iter()
        .map(|(name, schema)| {
            let mut root = schema();
            root.schema.metadata().title = Some((*name).to_string());
            ((*name).to_string(), root)
        })
        .collect();
    SchemaDocument { entries }
}

/// Write the combined schema document to `output_path`.
///
/// Missing parent directories are created. Returns the path written.
pub fn write_schema(output_path: impl AsRef<Path>) -> Result<PathBuf, SchemaError> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SchemaError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let document = build_schema();
    debug!(models = document.len(), "Built schema document");

    write_document(output_path, &document).map_err(|source| SchemaError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(path = %output_path.display(), "Wrote schema document");
    Ok(output_path.to_path_buf())
}

fn write_document(path: &Path, document: &SchemaDocument) -> io::Result<()> {
    let value = document.to_value().map_err(io::Error::from)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &value).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

//! ISO 8601 timestamps that keep the form they were given in.
//!
//! Upstream boards publish both zoned (`2025-01-15T09:30:00+01:00`) and
//! wall-clock (`2025-01-15T09:30:00`) times. Both are accepted, and a value
//! serializes back exactly as it was parsed (a zero offset renders as `Z`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A date and time, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Carries an explicit offset
    Offset(DateTime<FixedOffset>),
    /// Wall-clock time with no offset
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Parse an RFC 3339 timestamp, falling back to one without offset.
    pub fn parse(input: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(input) {
            Ok(zoned) => Ok(Self::Offset(zoned)),
            Err(err) => input
                .parse::<NaiveDateTime>()
                .map(Self::Naive)
                .map_err(|_| err),
        }
    }

    /// The instant in UTC; `None` for wall-clock values.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Offset(zoned) => Some(zoned.with_timezone(&Utc)),
            Self::Naive(_) => None,
        }
    }

    /// Date and time as written, ignoring any offset.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Self::Offset(zoned) => zoned.naive_local(),
            Self::Naive(naive) => *naive,
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Offset(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(zoned) => f.write_str(&zoned.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&raw), &"an ISO 8601 datetime"))
    }
}

impl JsonSchema for Timestamp {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "Timestamp".to_string()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("date-time".to_string()),
            ..Default::default()
        }
        .into()
    }
}

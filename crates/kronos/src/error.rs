//! Error types for the return engine and its input boundary.
//!
//! The engine itself (`ReturnSetBuilder::build`) never fails; these errors are
//! raised while constructing configuration or mapping loosely typed input
//! into strict values.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::chart::Body;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReturnError {
    #[error("birth instant {birth} is after reference instant {reference}")]
    BirthAfterReference {
        birth: DateTime<Utc>,
        reference: DateTime<Utc>,
    },

    #[error("cycle period for {body} must be at least one millisecond, got {period_days} days")]
    InvalidPeriod { body: Body, period_days: f64 },

    #[error("{0} appears more than once in the cycle table")]
    DuplicateCycle(Body),

    #[error("invalid {name}: {value} (windows must be finite, non-negative and exact <= activation)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("cannot parse instant '{0}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidInstant(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("placement is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("unknown body '{0}'")]
    UnknownBody(String),

    #[error("unknown zodiac sign '{0}'")]
    UnknownSign(String),

    #[error("degree {0} is outside 0..30")]
    DegreeOutOfRange(f64),

    #[error("house {0} is outside 1..=12")]
    HouseOutOfRange(i64),

    #[error("angle {0} is outside 0..360")]
    AngleOutOfRange(f64),

    #[error("malformed placement: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart must be an array of placements or an object with a 'placements' array")]
    Shape,

    #[error("placement #{index}: {source}")]
    Placement {
        index: usize,
        #[source]
        source: PlacementError,
    },
}

//! Mapping of loosely shaped chart input into strict [`Placement`] values.
//!
//! Chart sources hand over JSON objects with optional or stringly fields.
//! Everything is validated here so the return engine only ever sees
//! well-formed placements and UTC instants.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::chart::types::{Body, Placement, ZodiacSign};
use crate::error::{ChartError, PlacementError, ReturnError};

/// A placement as it arrives from the chart source, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlacement {
    #[serde(default, alias = "planet")]
    pub body: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub degree: Option<f64>,
    #[serde(default)]
    pub retrograde: Option<bool>,
    #[serde(default)]
    pub house: Option<i64>,
    #[serde(default, alias = "longitude")]
    pub angle: Option<f64>,
}

impl TryFrom<RawPlacement> for Placement {
    type Error = PlacementError;

    fn try_from(raw: RawPlacement) -> Result<Self, Self::Error> {
        let body: Body = raw
            .body
            .as_deref()
            .ok_or(PlacementError::MissingField("body"))?
            .parse()?;
        let sign: ZodiacSign = raw
            .sign
            .as_deref()
            .ok_or(PlacementError::MissingField("sign"))?
            .parse()?;

        let degree = raw.degree.ok_or(PlacementError::MissingField("degree"))?;
        if !(0.0..30.0).contains(&degree) {
            return Err(PlacementError::DegreeOutOfRange(degree));
        }

        let house = raw.house.ok_or(PlacementError::MissingField("house"))?;
        if !(1..=12).contains(&house) {
            return Err(PlacementError::HouseOutOfRange(house));
        }

        let angle = raw.angle.ok_or(PlacementError::MissingField("angle"))?;
        if !(0.0..360.0).contains(&angle) {
            return Err(PlacementError::AngleOutOfRange(angle));
        }

        Ok(Placement {
            body,
            sign,
            degree,
            // Chart sources omit the flag for bodies that never station.
            retrograde: raw.retrograde.unwrap_or(false),
            house: house as u8,
            angle,
        })
    }
}

/// Validate a list of raw placements, reporting the first bad entry by index.
pub fn validate_placements(raw: Vec<RawPlacement>) -> Result<Vec<Placement>, ChartError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            Placement::try_from(entry).map_err(|source| ChartError::Placement { index, source })
        })
        .collect()
}

/// Parse a chart from JSON: either a bare array of placements or an object
/// with a `placements` array.
///
/// Entries are decoded one at a time so a mistyped field still reports the
/// index of the placement it belongs to.
pub fn parse_chart_json(text: &str) -> Result<Vec<Placement>, ChartError> {
    let entries = match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => entries,
        Value::Object(mut doc) => match doc.remove("placements") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ChartError::Shape),
        },
        _ => return Err(ChartError::Shape),
    };

    let raw = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            RawPlacement::deserialize(entry).map_err(|e| ChartError::Placement {
                index,
                source: PlacementError::Malformed(e.to_string()),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_placements(raw)
}

/// Parse a caller-supplied instant.
///
/// Plain dates become UTC midnight; RFC 3339 timestamps are converted to UTC.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, ReturnError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ReturnError::InvalidInstant(text.to_string()))
}

/// Reject a birth instant that lies after the reference instant.
pub fn validate_instants(
    birth: DateTime<Utc>,
    reference: DateTime<Utc>,
) -> Result<(), ReturnError> {
    if birth > reference {
        return Err(ReturnError::BirthAfterReference { birth, reference });
    }
    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::Body;
use crate::returns::phase::ReturnPhase;

/// Return status of one tracked body at a reference instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub planet: Body,
    /// Registry label, e.g. "Saturn Return"
    #[serde(rename = "returnType")]
    pub return_type: String,
    pub phase: ReturnPhase,
    /// Days until the nearest exact return; negative once it has passed
    #[serde(rename = "proximityDays")]
    pub proximity_days: f64,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// Instant of the nearest return, past or future
    #[serde(rename = "returnDate")]
    pub return_date: DateTime<Utc>,
    /// Which return this is (3 for a third Saturn return, age for a solar return)
    #[serde(rename = "returnNumber")]
    pub return_number: u64,
}

/// Next return strictly after the reference instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingReturn {
    pub planet: Body,
    #[serde(rename = "returnType")]
    pub return_type: String,
    #[serde(rename = "returnDate")]
    pub return_date: DateTime<Utc>,
    #[serde(rename = "daysUntil")]
    pub days_until: f64,
    #[serde(rename = "returnNumber")]
    pub return_number: u64,
}

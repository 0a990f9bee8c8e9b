use serde::{Deserialize, Serialize};

use crate::chart::Body;

/// Mean sidereal period of Jupiter in days (~11.862 years)
pub const JUPITER_PERIOD_DAYS: f64 = 4332.59;
/// Mean sidereal period of Saturn in days (~29.457 years)
pub const SATURN_PERIOD_DAYS: f64 = 10759.22;
/// Shortest accepted period: one millisecond, the resolution of an anchor instant
pub const MIN_PERIOD_DAYS: f64 = 1.0 / 86_400_000.0;

/// How a body's return recurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnCycle {
    /// Recurs on the birth month/day each calendar year
    CalendarYear,
    /// Recurs every `period_days` after birth
    FixedPeriod { period_days: f64 },
}

/// One row of the cycle table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSpec {
    pub body: Body,
    /// Display label, e.g. "Saturn Return"
    pub label: String,
    pub cycle: ReturnCycle,
}

impl CycleSpec {
    pub fn new(body: Body, cycle: ReturnCycle) -> Self {
        Self {
            body,
            label: format!("{} Return", body),
            cycle,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

use std::collections::HashSet;

use crate::chart::Body;
use crate::cycles::types::{
    CycleSpec, ReturnCycle, JUPITER_PERIOD_DAYS, MIN_PERIOD_DAYS, SATURN_PERIOD_DAYS,
};
use crate::error::ReturnError;

lazy_static::lazy_static! {
    static ref STANDARD: CycleRegistry = CycleRegistry {
        entries: vec![
            CycleSpec::new(Body::Sun, ReturnCycle::CalendarYear).with_label("Solar Return"),
            CycleSpec::new(Body::Jupiter, ReturnCycle::FixedPeriod { period_days: JUPITER_PERIOD_DAYS }),
            CycleSpec::new(Body::Saturn, ReturnCycle::FixedPeriod { period_days: SATURN_PERIOD_DAYS }),
        ],
    };
}

/// Immutable table of tracked bodies and their return cycles.
///
/// This is the only place that decides which bodies produce returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRegistry {
    entries: Vec<CycleSpec>,
}

impl CycleRegistry {
    /// Build a custom table. Periods must be finite and at least [`MIN_PERIOD_DAYS`];
    /// each body may appear once.
    pub fn new(entries: Vec<CycleSpec>) -> Result<Self, ReturnError> {
        let mut seen = HashSet::new();
        for spec in &entries {
            if let ReturnCycle::FixedPeriod { period_days } = spec.cycle {
                if !period_days.is_finite() || period_days < MIN_PERIOD_DAYS {
                    return Err(ReturnError::InvalidPeriod {
                        body: spec.body,
                        period_days,
                    });
                }
            }
            if !seen.insert(spec.body) {
                return Err(ReturnError::DuplicateCycle(spec.body));
            }
        }
        Ok(Self { entries })
    }

    /// Sun (calendar year), Jupiter and Saturn.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Shared instance of [`CycleRegistry::standard`].
    pub fn standard_ref() -> &'static CycleRegistry {
        &STANDARD
    }

    pub fn lookup(&self, body: Body) -> Option<&CycleSpec> {
        self.entries.iter().find(|spec| spec.body == body)
    }

    pub fn tracked_bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.entries.iter().map(|spec| spec.body)
    }

    pub fn entries(&self) -> &[CycleSpec] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CycleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

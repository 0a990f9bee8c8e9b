use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::chart::{validate_instants, Body, Placement};
use crate::cycles::{CycleRegistry, CycleSpec};
use crate::error::ReturnError;
use crate::returns::anchor::{find_nearest_anchor, find_next_anchor};
use crate::returns::phase::{PhaseClassifier, PhaseThresholds};
use crate::returns::types::{ReturnRecord, UpcomingReturn};

lazy_static::lazy_static! {
    static ref DEFAULT_BUILDER: ReturnSetBuilder = ReturnSetBuilder::default();
}

/// Assembles return records for a natal chart.
#[derive(Debug, Clone, Default)]
pub struct ReturnSetBuilder {
    registry: CycleRegistry,
    classifier: PhaseClassifier,
}

impl ReturnSetBuilder {
    pub fn new(registry: CycleRegistry, thresholds: PhaseThresholds) -> Self {
        Self {
            registry,
            classifier: PhaseClassifier::new(thresholds),
        }
    }

    pub fn registry(&self) -> &CycleRegistry {
        &self.registry
    }

    pub fn thresholds(&self) -> &PhaseThresholds {
        self.classifier.thresholds()
    }

    /// One record per tracked body in `chart`, in chart order.
    ///
    /// Untracked bodies are skipped. A body listed twice only reports once.
    /// Never fails: empty charts and extreme ages are ordinary outcomes.
    pub fn build(
        &self,
        chart: &[Placement],
        reference: DateTime<Utc>,
        birth: DateTime<Utc>,
    ) -> Vec<ReturnRecord> {
        self.tracked(chart)
            .map(|spec| {
                let anchor = find_nearest_anchor(&spec.cycle, birth, reference);
                let reading = self.classifier.classify(anchor.days_from_reference);
                log::debug!(
                    "{}: anchor {} ({:+.2} days, {:?})",
                    spec.label,
                    anchor.at,
                    reading.proximity_days,
                    reading.phase
                );
                ReturnRecord {
                    planet: spec.body,
                    return_type: spec.label.clone(),
                    phase: reading.phase,
                    proximity_days: reading.proximity_days,
                    is_active: reading.is_active,
                    return_date: anchor.at,
                    return_number: anchor.return_number,
                }
            })
            .collect()
    }

    /// [`build`](Self::build) after checking that birth does not follow the reference.
    pub fn try_build(
        &self,
        chart: &[Placement],
        reference: DateTime<Utc>,
        birth: DateTime<Utc>,
    ) -> Result<Vec<ReturnRecord>, ReturnError> {
        validate_instants(birth, reference)?;
        Ok(self.build(chart, reference, birth))
    }

    /// Next future return per tracked body in `chart`, in chart order.
    pub fn next_returns(
        &self,
        chart: &[Placement],
        reference: DateTime<Utc>,
        birth: DateTime<Utc>,
    ) -> Vec<UpcomingReturn> {
        self.tracked(chart)
            .map(|spec| {
                let anchor = find_next_anchor(&spec.cycle, birth, reference);
                UpcomingReturn {
                    planet: spec.body,
                    return_type: spec.label.clone(),
                    return_date: anchor.at,
                    days_until: anchor.days_from_reference,
                    return_number: anchor.return_number,
                }
            })
            .collect()
    }

    fn tracked<'a>(&'a self, chart: &'a [Placement]) -> impl Iterator<Item = &'a CycleSpec> + 'a {
        let mut seen: HashSet<Body> = HashSet::new();
        chart.iter().filter_map(move |placement| {
            let spec = match self.registry.lookup(placement.body) {
                Some(spec) => spec,
                None => {
                    log::debug!("{} has no tracked return cycle, skipping", placement.body);
                    return None;
                }
            };
            if !seen.insert(placement.body) {
                log::debug!("{} listed more than once, keeping the first", placement.body);
                return None;
            }
            Some(spec)
        })
    }
}

/// Planetary returns for `chart` with the standard cycle table and default windows.
pub fn compute_planetary_returns(
    chart: &[Placement],
    reference: DateTime<Utc>,
    birth: DateTime<Utc>,
) -> Vec<ReturnRecord> {
    DEFAULT_BUILDER.build(chart, reference, birth)
}

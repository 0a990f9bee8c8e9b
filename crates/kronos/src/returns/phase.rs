use serde::{Deserialize, Serialize};

use crate::error::ReturnError;

pub const DEFAULT_EXACT_WINDOW_DAYS: f64 = 1.0;
pub const DEFAULT_ACTIVATION_WINDOW_DAYS: f64 = 30.0;

/// Where a return stands relative to its exact date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnPhase {
    Approaching,
    Exact,
    Separating,
}

/// Day windows used to classify a return. Shared by every body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// `|proximity| <= exact_window_days` reads as exact
    pub exact_window_days: f64,
    /// `|proximity| <= activation_window_days` marks the return active
    pub activation_window_days: f64,
}

impl PhaseThresholds {
    pub fn new(exact_window_days: f64, activation_window_days: f64) -> Result<Self, ReturnError> {
        if !exact_window_days.is_finite() || exact_window_days < 0.0 {
            return Err(ReturnError::InvalidThreshold {
                name: "exact_window_days",
                value: exact_window_days,
            });
        }
        if !activation_window_days.is_finite() || activation_window_days < exact_window_days {
            return Err(ReturnError::InvalidThreshold {
                name: "activation_window_days",
                value: activation_window_days,
            });
        }
        Ok(Self {
            exact_window_days,
            activation_window_days,
        })
    }
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            exact_window_days: DEFAULT_EXACT_WINDOW_DAYS,
            activation_window_days: DEFAULT_ACTIVATION_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReading {
    pub phase: ReturnPhase,
    /// Positive before the exact date, negative after
    pub proximity_days: f64,
    pub is_active: bool,
}

/// Classifies signed distances to an anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseClassifier {
    thresholds: PhaseThresholds,
}

impl PhaseClassifier {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PhaseThresholds {
        &self.thresholds
    }

    /// `days_to_anchor` is `anchor - reference` in days.
    pub fn classify(&self, days_to_anchor: f64) -> PhaseReading {
        let proximity_days = days_to_anchor;
        let distance = proximity_days.abs();

        let phase = if distance <= self.thresholds.exact_window_days {
            ReturnPhase::Exact
        } else if proximity_days > 0.0 {
            ReturnPhase::Approaching
        } else {
            ReturnPhase::Separating
        };

        PhaseReading {
            phase,
            proximity_days,
            is_active: distance <= self.thresholds.activation_window_days,
        }
    }
}

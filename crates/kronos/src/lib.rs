//! Planetary return engine.
//!
//! Given natal placements, a birth instant and a reference instant, reports
//! for each tracked body (Sun, Jupiter, Saturn by default) the nearest return,
//! whether it is approaching, exact or separating, and whether it falls inside
//! the activation window.

pub mod chart;
pub mod cycles;
pub mod error;
pub mod returns;

pub use chart::{parse_chart_json, parse_instant, Body, Placement, RawPlacement, ZodiacSign};
pub use cycles::{CycleRegistry, CycleSpec, ReturnCycle};
pub use error::{ChartError, PlacementError, ReturnError};
pub use returns::{
    compute_planetary_returns, PhaseThresholds, ReturnPhase, ReturnRecord, ReturnSetBuilder,
    UpcomingReturn,
};

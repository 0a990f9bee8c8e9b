pub mod anchor;
pub mod builder;
pub mod phase;
pub mod types;

pub use anchor::{days_between, find_nearest_anchor, find_next_anchor, Anchor};
pub use builder::{compute_planetary_returns, ReturnSetBuilder};
pub use phase::{PhaseClassifier, PhaseReading, PhaseThresholds, ReturnPhase};
pub use types::{ReturnRecord, UpcomingReturn};

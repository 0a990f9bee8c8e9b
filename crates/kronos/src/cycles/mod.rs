pub mod registry;
pub mod types;

pub use registry::CycleRegistry;
pub use types::{CycleSpec, ReturnCycle, JUPITER_PERIOD_DAYS, MIN_PERIOD_DAYS, SATURN_PERIOD_DAYS};

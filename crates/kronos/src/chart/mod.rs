pub mod boundary;
pub mod types;

pub use boundary::{parse_chart_json, parse_instant, validate_instants, validate_placements, RawPlacement};
pub use types::{Body, Placement, ZodiacSign};

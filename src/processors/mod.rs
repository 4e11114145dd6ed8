// rizer/src/processors/mod.rs
mod encoder;
mod executor;
mod loader;
mod planner;
mod resizer;

pub use encoder::{format_extension, parse_output_format, Encoder};
pub use executor::{OutputJob, ResizeExecutor};
pub use loader::{Loader, SourceImage};
pub use planner::{generate_levels, resolve_levels, TargetPlanner};
pub use resizer::{calculate_dimensions, Resizer};

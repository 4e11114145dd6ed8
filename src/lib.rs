mod cli;
mod config;
mod core;
mod processors;
mod utils;

pub use cli::{normalize_args, Algorithm, Cli};
pub use config::{
    load_config, resolve, validate, CliOptions, ConfigLoadError, ConfigLoader, DiscoveredConfig,
    FileConfig, LevelSelection, Violation, SEARCH_PLACES,
};
pub use crate::core::guard::{ambiguous_values, guard_ambiguous_input, AssumeYes, Confirm, TerminalPrompt};
pub use crate::core::processor::Rizer;
pub use crate::core::{
    default_levels, ImageMeta, Level, Mode, Options, PlanEntry, ResizeAlgorithm, ResizeTarget,
    Result, RizerError, RunOutcome, RunReport, Skip, SkipReason, TargetOutcome, TargetStatus,
};
pub use processors::{
    calculate_dimensions, format_extension, generate_levels, parse_output_format,
    resolve_levels, Encoder, Loader, OutputJob, ResizeExecutor, Resizer, SourceImage,
    TargetPlanner,
};
pub use utils::{compose_filename, format_file_size, parse_csv, split_file_name};

pub mod prelude {
    pub use crate::{
        Confirm, Mode, Options, PlanEntry, ResizeExecutor, Rizer, RunOutcome, TargetPlanner,
    };
}

// Re-export commonly used types
pub use image::{DynamicImage, ImageFormat};

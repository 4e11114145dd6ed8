// rizer/src/core/processor.rs
use super::guard::{guard_ambiguous_input, Confirm};
use super::{Options, Result, RizerError, RunOutcome, RunReport};
use crate::processors::{
    format_extension, parse_output_format, Encoder, Loader, OutputJob, ResizeExecutor, Resizer,
    TargetPlanner,
};
use crate::utils::split_file_name;
use image::ImageFormat;
use std::path::Path;

/// Runs one resize job: guard, load, plan, write.
pub struct Rizer {
    options: Options,
    loader: Loader,
}

impl Rizer {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            loader: Loader::new(),
        }
    }

    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn run(&self, input: &Path, confirm: &dyn Confirm) -> Result<RunOutcome> {
        self.options.validate()?;

        if !input.is_file() {
            return Err(RizerError::InputNotFound(input.to_path_buf()));
        }

        if let Some(levels) = &self.options.levels {
            if !guard_ambiguous_input(levels, self.options.mode, confirm)? {
                return Ok(RunOutcome::Declined);
            }
        }

        let override_format = self
            .options
            .output_format
            .as_deref()
            .map(parse_output_format)
            .transpose()?;

        let source = self.loader.load(input)?;
        let meta = source.meta();

        let planner = TargetPlanner::new(self.options.allow_upscale);
        let plan = planner.plan(
            self.options.mode,
            self.options.levels.as_deref(),
            self.options.count_hint,
            meta,
        );

        let (name, source_ext) = split_file_name(input);
        let (format, ext) = match override_format {
            Some(format) => (format, format_extension(format)),
            None => (self.source_format(source.format, input)?, source_ext),
        };

        let job = OutputJob {
            directory: self.options.output_directory.clone(),
            name,
            ext,
            pattern: self.options.filename_pattern.clone(),
            format,
        };

        if plan.iter().any(|entry| !entry.is_skipped()) {
            self.prepare_output_dir(&job.directory);
        }

        let executor = ResizeExecutor::new(
            Resizer::new(self.options.algorithm),
            Encoder::new(self.options.quality).with_png_optimization(self.options.optimize_png),
            self.options.threads,
        )?
        .with_progress(self.options.show_progress);

        let outcomes = executor.execute(&source.image, &plan, &job);

        Ok(RunOutcome::Completed(RunReport { plan, outcomes }))
    }

    fn source_format(&self, guessed: Option<ImageFormat>, input: &Path) -> Result<ImageFormat> {
        guessed
            .or_else(|| ImageFormat::from_path(input).ok())
            .ok_or_else(|| {
                RizerError::UnsupportedFormat(format!(
                    "Cannot determine format of {}",
                    input.display()
                ))
            })
    }

    fn prepare_output_dir(&self, directory: &Path) {
        if directory.is_dir() {
            return;
        }

        if let Err(e) = std::fs::create_dir_all(directory) {
            log::warn!(
                "Could not create output directory {}: {}",
                directory.display(),
                e
            );
        }
    }
}

// rizer/src/processors/executor.rs
use crate::core::{
    PlanEntry, ResizeTarget, Result, RizerError, TargetOutcome, TargetStatus, MAX_DIMENSION,
    MAX_OUTPUT_PIXELS,
};
use crate::processors::{calculate_dimensions, Encoder, Resizer};
use crate::utils::{compose_filename, format_file_size};
use image::{DynamicImage, ImageFormat};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Where and how the planned targets are written.
#[derive(Debug, Clone)]
pub struct OutputJob {
    pub directory: PathBuf,
    pub name: String,
    pub ext: String,
    pub pattern: String,
    pub format: ImageFormat,
}

impl OutputJob {
    pub fn path_for(&self, target: &ResizeTarget) -> PathBuf {
        let filename = compose_filename(&self.pattern, &self.name, &target.suffix, &self.ext);
        self.directory.join(filename)
    }
}

pub struct ResizeExecutor {
    resizer: Resizer,
    encoder: Encoder,
    thread_pool: Option<rayon::ThreadPool>,
    show_progress: bool,
    max_dimension: u32,
    max_pixels: u64,
}

impl ResizeExecutor {
    pub fn new(resizer: Resizer, encoder: Encoder, max_threads: usize) -> Result<Self> {
        let mut executor = Self {
            resizer,
            encoder,
            thread_pool: None,
            show_progress: false,
            max_dimension: MAX_DIMENSION,
            max_pixels: MAX_OUTPUT_PIXELS,
        };

        if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    RizerError::ProcessingError(format!("Failed to create thread pool: {}", e))
                })?;
            executor.thread_pool = Some(pool);
        }

        Ok(executor)
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Caps the size of every generated image. Larger targets fail on their
    /// own instead of being allocated.
    pub fn with_output_limits(mut self, max_dimension: u32, max_pixels: u64) -> Self {
        self.max_dimension = max_dimension;
        self.max_pixels = max_pixels;
        self
    }

    /// Writes every target of the plan, each resized from `source`.
    ///
    /// A failing target is reported in its outcome and never stops the
    /// others. Outcomes follow plan order; skipped entries have none.
    pub fn execute(
        &self,
        source: &DynamicImage,
        plan: &[PlanEntry],
        job: &OutputJob,
    ) -> Vec<TargetOutcome> {
        let targets: Vec<&ResizeTarget> = plan.iter().filter_map(PlanEntry::target).collect();
        if targets.is_empty() {
            log::warn!("No targets to generate");
            return Vec::new();
        }

        let pb = self.create_progress_bar(targets.len());

        let run = || -> Vec<TargetOutcome> {
            targets
                .par_iter()
                .progress_with(pb.clone())
                .map(|target| self.execute_target(source, target, job))
                .collect()
        };

        let outcomes = match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let written = outcomes.iter().filter(|o| o.is_written()).count();
        pb.finish_with_message(format!("{} of {} generated", written, outcomes.len()));

        outcomes
    }

    fn execute_target(
        &self,
        source: &DynamicImage,
        target: &ResizeTarget,
        job: &OutputJob,
    ) -> TargetOutcome {
        let path = job.path_for(target);

        let status = match self.write_target(source, target, &path, job.format) {
            Ok(bytes) => {
                log::info!("✔ Generated: {} ({})", path.display(), format_file_size(bytes));
                TargetStatus::Written { bytes }
            }
            Err(e) => {
                log::error!("✖ Failed to generate {}: {}", target.suffix, e);
                TargetStatus::Failed {
                    message: e.to_string(),
                }
            }
        };

        TargetOutcome {
            suffix: target.suffix.clone(),
            path,
            status,
        }
    }

    fn write_target(
        &self,
        source: &DynamicImage,
        target: &ResizeTarget,
        path: &Path,
        format: ImageFormat,
    ) -> Result<u64> {
        self.check_output_size(source, target)?;
        let resized = self.resizer.resize(source, target);
        self.encoder.save(&resized, path, format)
    }

    fn check_output_size(&self, source: &DynamicImage, target: &ResizeTarget) -> Result<()> {
        let (width, height) = calculate_dimensions((source.width(), source.height()), target);
        let pixels = width as u64 * height as u64;

        if width > self.max_dimension || height > self.max_dimension || pixels > self.max_pixels {
            return Err(RizerError::MemoryLimitExceeded(format!(
                "Output {}x{} exceeds the limit of {} px per side and {} pixels",
                width, height, self.max_dimension, self.max_pixels
            )));
        }

        Ok(())
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

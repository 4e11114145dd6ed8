// rizer/src/processors/planner.rs
use crate::core::{default_levels, ImageMeta, Level, Mode, PlanEntry, ResizeTarget, Skip, SkipReason};

/// Turns requested levels into concrete resize targets.
///
/// Individual bad levels never fail the plan; they become
/// [`PlanEntry::Skipped`] so the remaining levels still run.
#[derive(Debug, Clone, Copy)]
pub struct TargetPlanner {
    allow_upscale: bool,
}

impl TargetPlanner {
    pub fn new(allow_upscale: bool) -> Self {
        Self { allow_upscale }
    }

    pub fn plan(
        &self,
        mode: Mode,
        levels: Option<&[Level]>,
        count: Option<u32>,
        meta: ImageMeta,
    ) -> Vec<PlanEntry> {
        let (mode, levels) = resolve_levels(mode, levels, count, meta);

        log::debug!(
            "Planning {} {} level(s) for {}x{} source",
            levels.len(),
            mode,
            meta.width,
            meta.height
        );

        levels
            .iter()
            .map(|level| {
                let entry = self.plan_level(mode, level, meta);
                if let PlanEntry::Skipped(skip) = &entry {
                    log::warn!("✖ Skipping {} {}: {}", mode, skip.level, skip.reason);
                }
                entry
            })
            .collect()
    }

    fn plan_level(&self, mode: Mode, level: &Level, meta: ImageMeta) -> PlanEntry {
        match mode {
            Mode::Width => self.plan_pixels(level, meta.width, |px| ResizeTarget {
                width: Some(px),
                height: None,
                suffix: format!("@{}px", px),
            }),
            Mode::Height => self.plan_pixels(level, meta.height, |px| ResizeTarget {
                width: None,
                height: Some(px),
                suffix: format!("@{}px", px),
            }),
            Mode::Ratio => plan_ratio(level, meta),
        }
    }

    fn plan_pixels<F>(&self, level: &Level, original: u32, build: F) -> PlanEntry
    where
        F: FnOnce(u32) -> ResizeTarget,
    {
        let value = match level.value() {
            Some(v) => v.trunc(),
            None => return skip(level, SkipReason::NotANumber),
        };

        if value < 1.0 {
            return skip(level, SkipReason::BelowOnePixel);
        }

        let pixels = value.min(u32::MAX as f64) as u32;
        if !self.allow_upscale && pixels > original {
            return skip(
                level,
                SkipReason::Upscale {
                    requested: pixels,
                    original,
                },
            );
        }

        PlanEntry::Target(build(pixels))
    }
}

fn plan_ratio(level: &Level, meta: ImageMeta) -> PlanEntry {
    let ratio = match level.value() {
        Some(v) => v,
        None => return skip(level, SkipReason::NotANumber),
    };

    if ratio <= 0.0 || ratio > 1.0 {
        return skip(level, SkipReason::RatioOutOfRange(ratio));
    }

    let width = scale_dimension(meta.width, ratio);
    let height = scale_dimension(meta.height, ratio);

    PlanEntry::Target(ResizeTarget {
        width: Some(width),
        height: Some(height),
        suffix: format!("@{}", level.text()),
    })
}

fn scale_dimension(original: u32, ratio: f64) -> u32 {
    ((original as f64 * ratio).round() as u32).max(1)
}

fn skip(level: &Level, reason: SkipReason) -> PlanEntry {
    PlanEntry::Skipped(Skip {
        level: level.text().to_string(),
        reason,
    })
}

/// Picks the levels the plan runs over.
///
/// Explicit levels win and keep their order. A count synthesizes evenly
/// spaced levels. With neither, the default ratio levels apply and the mode
/// switches to ratio.
pub fn resolve_levels(
    mode: Mode,
    levels: Option<&[Level]>,
    count: Option<u32>,
    meta: ImageMeta,
) -> (Mode, Vec<Level>) {
    match (levels, count) {
        (Some(levels), _) => (mode, levels.to_vec()),
        (None, Some(count)) => (mode, generate_levels(mode, count, meta)),
        (None, None) => (Mode::Ratio, default_levels()),
    }
}

/// `count` evenly spaced levels strictly inside the original size.
///
/// The `count + 1` divisor keeps every generated level away from both 0 and
/// the full size.
pub fn generate_levels(mode: Mode, count: u32, meta: ImageMeta) -> Vec<Level> {
    let divisor = count as u64 + 1;
    match mode {
        Mode::Width | Mode::Height => {
            let original = if mode == Mode::Width {
                meta.width
            } else {
                meta.height
            };
            let step = original as u64 / divisor;
            (1..=count as u64)
                .map(|i| Level::new((step * i).to_string()))
                .collect()
        }
        Mode::Ratio => {
            let step = 1.0 / divisor as f64;
            (1..=count)
                .map(|i| Level::from_number(round_to_hundredths(i as f64 * step)))
                .collect()
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

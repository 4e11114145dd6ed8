// rizer/src/cli.rs
use crate::config::{CliOptions, LevelSelection};
use crate::core::{Mode, ResizeAlgorithm, DEFAULT_QUALITY};
use crate::utils::parse_csv;
use clap::{ArgAction, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  $ rizer image.jpg -w 320,640
  $ rizer image.jpg -h 240,480
  $ rizer image.jpg -r 0.25,0.5
  $ rizer image.jpg -wc 4
  $ rizer image.jpg -w 1920 -u
  $ rizer image.jpg";

/// Multi-letter short flags and the long flags they stand for.
const SHORT_ALIASES: [(&str, &str); 3] = [
    ("-wc", "--width-count"),
    ("-hc", "--height-count"),
    ("-rc", "--ratio-count"),
];

#[derive(Parser, Debug)]
#[command(
    name = "rizer",
    version,
    about = "Resize images to multiple resolutions (width, height, or ratio)",
    disable_help_flag = true,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Input image file
    pub file: PathBuf,

    /// Comma-separated widths (in px)
    #[arg(short = 'w', long, value_name = "VALUES", conflicts_with = "width_count")]
    pub width: Option<String>,

    /// Comma-separated heights (in px)
    #[arg(short = 'h', long, value_name = "VALUES", conflicts_with = "height_count")]
    pub height: Option<String>,

    /// Comma-separated scale ratios (0 < ratio ≤ 1)
    #[arg(short = 'r', long, value_name = "VALUES", conflicts_with = "ratio_count")]
    pub ratio: Option<String>,

    /// Generate N evenly spaced widths (-wc)
    #[arg(long, value_name = "N")]
    pub width_count: Option<u32>,

    /// Generate N evenly spaced heights (-hc)
    #[arg(long, value_name = "N")]
    pub height_count: Option<u32>,

    /// Generate N evenly spaced ratios (-rc)
    #[arg(long, value_name = "N")]
    pub ratio_count: Option<u32>,

    /// Allow upscaling images beyond original size
    #[arg(short = 'u', long)]
    pub allow_upscale: bool,

    /// Output directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Skip configuration file discovery
    #[arg(long)]
    pub ignore_config: bool,

    /// Output format (jpg, png, webp, gif, bmp, tiff)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Filename pattern using ${name}, ${suffix} and ${ext}
    #[arg(short = 'p', long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// JPEG quality
    #[arg(short = 'q', long, default_value_t = DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Resampling filter
    #[arg(short = 'a', long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Losslessly optimize PNG output
    #[arg(long)]
    pub optimize_png: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

impl Cli {
    /// Parses the process arguments, accepting `-wc`, `-hc` and `-rc`.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The requested sizes, width before height before ratio.
    pub fn selection(&self) -> Option<LevelSelection> {
        let candidates = [
            (Mode::Width, &self.width, self.width_count),
            (Mode::Height, &self.height, self.height_count),
            (Mode::Ratio, &self.ratio, self.ratio_count),
        ];

        let mut given = candidates
            .iter()
            .filter(|(_, list, count)| list.is_some() || count.is_some());

        let (mode, list, count) = given.next()?;
        for (ignored, _, _) in given {
            log::warn!("Ignoring {} options, {} takes precedence", ignored, mode);
        }

        match (list, count) {
            (Some(list), _) => Some(LevelSelection::Levels(*mode, parse_csv(list))),
            (None, Some(count)) => Some(LevelSelection::Count(*mode, *count)),
            (None, None) => None,
        }
    }

    pub fn to_options(&self) -> CliOptions {
        CliOptions {
            selection: self.selection(),
            allow_upscale: self.allow_upscale.then_some(true),
            filename_pattern: self.pattern.clone(),
            output_format: self.format.clone(),
            output_directory: self.outdir.clone(),
            quality: self.quality,
            algorithm: self.algorithm.into(),
            optimize_png: self.optimize_png,
            threads: self.threads,
            show_progress: !self.verbose,
        }
    }
}

/// Rewrites the multi-letter short flags into their long forms so clap
/// can parse them. Arguments after `--` are left alone.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if passthrough {
                return arg;
            }
            if arg.to_str() == Some("--") {
                passthrough = true;
                return arg;
            }
            let expanded = arg.to_str().and_then(expand_alias);
            expanded.unwrap_or(arg)
        })
        .collect()
}

fn expand_alias(text: &str) -> Option<OsString> {
    for (short, long) in SHORT_ALIASES {
        if text == short {
            return Some(OsString::from(long));
        }
        if let Some(value) = text.strip_prefix(short).and_then(|v| v.strip_prefix('=')) {
            return Some(OsString::from(format!("{}={}", long, value)));
        }
    }
    None
}

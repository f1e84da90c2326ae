//! Command-line interface for fretboard.
//!
//! Available commands:
//!
//! - **project**: Project a progression document onto the fretboard
//! - **solve**: Place one voicing on a fixed string set
//! - **tunings**: List the tuning presets
//!
//! ## Usage
//!
//! ```text
//! # Project a progression, one line per chord
//! fretboard project demos/ii-v-i-major.yaml
//!
//! # Drop-D, narrower stretch, JSON for scripting
//! fretboard project song.yaml --tuning drop-d --max-fret-span 4 --format json
//!
//! # Where does Cmaj7 fall on the top four strings around the 8th fret?
//! fretboard solve 48,52,55,59 --strings 2,3,4,5 --anchor 8
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use fretboard::{ProjectionConfig, Tuning};

pub mod project;
pub mod solve;
pub mod tunings;

#[derive(Parser)]
#[command(name = "fretboard")]
#[command(version)]
#[command(about = "Project chord voicings onto a six-string fretboard")]
#[command(
    long_about = "fretboard turns a sequence of voicings (MIDI pitches from a harmony engine) into playable fingerings.\n\nFor every chord it picks strings and frets within a hand stretch, follows the hand from chord to chord and reports whether the hand holds, steps or resets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project a progression document (YAML or JSON)
    Project(project::ProjectArgs),

    /// Place a single voicing on a string set
    Solve(solve::SolveArgs),

    /// List tuning presets
    Tunings,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Engine settings shared by the commands that build one.
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// Standalone YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tuning preset name or six comma-separated MIDI numbers
    #[arg(short, long)]
    pub tuning: Option<String>,

    /// Highest usable fret
    #[arg(long)]
    pub max_fret: Option<u8>,

    /// Widest stretch within one chord, in frets
    #[arg(long)]
    pub max_fret_span: Option<u8>,

    /// Anchor history length used for drift correction
    #[arg(long)]
    pub history_size: Option<usize>,
}

impl EngineArgs {
    /// Layer the config file, then individual flags, over `base`.
    pub fn resolve(&self, base: ProjectionConfig) -> anyhow::Result<ProjectionConfig> {
        let mut config = match &self.config {
            Some(path) => ProjectionConfig::from_yaml_str(&read_input(path)?)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => base,
        };

        if let Some(tuning) = &self.tuning {
            config.tuning = Tuning::parse(tuning)?;
        }
        if let Some(max_fret) = self.max_fret {
            config.max_fret = max_fret;
        }
        if let Some(max_fret_span) = self.max_fret_span {
            config.max_fret_span = max_fret_span;
        }
        if let Some(history_size) = self.history_size {
            config.history_size = history_size;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Serialize `value` for the structured formats.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
    }
}

/// Fret diagram, low string first: `x 5 7 7 6 x`.
pub fn fret_diagram(frets: &[Option<u8>]) -> String {
    frets
        .iter()
        .map(|f| f.map_or_else(|| "x".to_string(), |f| f.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

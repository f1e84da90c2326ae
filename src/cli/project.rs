use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use fretboard::{project_events, Mapping, ProjectedProgression, Progression};

use crate::cli::{fret_diagram, read_input, render_structured, EngineArgs, OutputFormat};

#[derive(Args)]
pub struct ProjectArgs {
    /// Progression document (YAML or JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ProjectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let source = read_input(&args.input)?;
    let progression = Progression::parse(&source)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    let config = args.engine.resolve(progression.effective_config())?;

    if verbose {
        eprintln!(
            "Projecting {} events (tuning {}, max fret {}, span {})",
            progression.events.len(),
            config.tuning,
            config.max_fret,
            config.max_fret_span
        );
    }

    let mappings = project_events(config, &progression.events)
        .with_context(|| format!("Failed to project {}", args.input.display()))?;
    let projected = ProjectedProgression {
        title: progression.title,
        config,
        mappings,
    };

    let rendered = match render_structured(&projected, format)? {
        Some(rendered) => rendered,
        None => render_text(&projected),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} mappings to {}", projected.mappings.len(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render_text(projected: &ProjectedProgression) -> String {
    let mut out = String::new();
    if let Some(title) = &projected.title {
        out.push_str(&format!("{}\n", title));
    }
    out.push_str(&format!("Tuning: {}\n\n", projected.config.tuning));
    for (i, mapping) in projected.mappings.iter().enumerate() {
        out.push_str(&render_mapping(i + 1, mapping));
        out.push('\n');
    }
    out
}

fn render_mapping(number: usize, mapping: &Mapping) -> String {
    format!(
        "{:>3}  {:<5}  {:<17}  anchor {:>2}  window {}",
        number,
        mapping.movement_type,
        fret_diagram(&mapping.frets),
        mapping.anchor_fret,
        mapping.position_window
    )
}

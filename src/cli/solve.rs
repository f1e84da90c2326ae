use clap::Args;

use fretboard::{note_name, Placement, PlacementKind, PositionSolver, ProjectionConfig, Voicing};

use crate::cli::{fret_diagram, render_structured, EngineArgs, OutputFormat};

#[derive(Args)]
pub struct SolveArgs {
    /// MIDI pitches, comma-separated (e.g. 48,52,55,59)
    #[arg(required = true, value_delimiter = ',')]
    pub pitches: Vec<u8>,

    /// String indices, low string = 0, one per voice, lowest voice first
    #[arg(short, long, required = true, value_delimiter = ',')]
    pub strings: Vec<usize>,

    /// Target fret the hand should stay near
    #[arg(short, long, default_value = "5")]
    pub anchor: u8,

    #[command(flatten)]
    pub engine: EngineArgs,
}

pub fn run(args: SolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.engine.resolve(ProjectionConfig::default())?;
    let solver = PositionSolver::new(&config);
    let voicing = Voicing::new(args.pitches);

    if verbose {
        let names: Vec<String> = voicing.pitches().iter().map(|&p| note_name(p)).collect();
        eprintln!("Solving {} on strings {:?} near fret {}", names.join(" "), args.strings, args.anchor);
    }

    let placement = solver.solve(&voicing, &args.strings, args.anchor, None)?;

    match render_structured(&placement, format)? {
        Some(rendered) => println!("{}", rendered),
        None => println!("{}", render_text(&placement)),
    }
    Ok(())
}

fn render_text(placement: &Placement) -> String {
    let kind = match placement.kind {
        PlacementKind::Exact => "exact",
        PlacementKind::Relocated => "relocated",
        PlacementKind::Forced => "forced",
    };
    format!(
        "{}  ({}, span {}, anchor {})",
        fret_diagram(&placement.frets()),
        kind,
        placement.span(),
        placement.anchor_fret()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretboard::VoicePosition;

    #[test]
    fn test_render_text() {
        let placement = Placement {
            positions: vec![
                VoicePosition { string: 2, fret: 10 },
                VoicePosition { string: 3, fret: 9 },
                VoicePosition { string: 4, fret: 8 },
                VoicePosition { string: 5, fret: 7 },
            ],
            kind: PlacementKind::Exact,
            score: Some(300.0),
            large_leaps: 0,
        };
        assert_eq!(render_text(&placement), "x x 10 9 8 7  (exact, span 3, anchor 7)");
    }
}

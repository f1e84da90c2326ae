use serde::Serialize;

use fretboard::Tuning;

use crate::cli::{render_structured, OutputFormat};

#[derive(Serialize)]
struct PresetEntry {
    name: &'static str,
    open: Tuning,
    notes: String,
}

pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let mut entries = Vec::new();
    for &name in Tuning::preset_names() {
        if let Some(tuning) = Tuning::preset(name) {
            entries.push(PresetEntry {
                name,
                open: tuning,
                notes: tuning.to_string(),
            });
        }
    }

    match render_structured(&entries, format)? {
        Some(rendered) => println!("{}", rendered),
        None => {
            for entry in &entries {
                println!("{:<16} {}", entry.name, entry.notes);
            }
        }
    }
    Ok(())
}

//! CLI tool to resolve a saved payload against a slot layout, showing what
//! every indicator would display. No network, no hardware.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use metarmap_core::{
    parse_payload, resolve, standard_legend, PanelState, SlotEntry, SlotRegistry, WindRules,
};

/// Resolve a saved payload (XML or JSON) against a panel layout
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Saved payload file
    payload: PathBuf,

    /// Stations in slot order; use NULL for gaps
    #[arg(long, value_delimiter = ',', required = true)]
    stations: Vec<String>,

    /// Include the six-entry legend prefix
    #[arg(long)]
    legend: bool,

    /// Moderate wind threshold in knots
    #[arg(long, default_value_t = 15)]
    moderate_kt: u32,

    /// Severe wind threshold in knots
    #[arg(long, default_value_t = 25)]
    severe_kt: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("cannot read {}", args.payload.display()))?;
    let reports = parse_payload(&text).context("could not parse payload")?;
    println!("{} reports in payload", reports.len());

    let legend = if args.legend {
        standard_legend()
    } else {
        Vec::new()
    };
    let registry = SlotRegistry::new(&legend, &args.stations);
    let rules = WindRules {
        moderate_kt: args.moderate_kt,
        severe_kt: args.severe_kt,
    };
    anyhow::ensure!(
        rules.is_valid(),
        "severe threshold must not sit below the moderate one"
    );

    let mut panel = PanelState::new(&registry);
    let hazards = resolve(&registry, &rules, &reports, &mut panel);

    println!();
    for (index, slot) in panel.slots().iter().enumerate() {
        let duty = match registry.entry(index) {
            Some(SlotEntry::Legend { .. }) => "legend",
            Some(SlotEntry::Station { icao }) => icao.as_str(),
            _ => "-",
        };
        let mut flags = String::new();
        if slot.lightning {
            flags.push_str(" lightning");
        }
        if slot.severe_wind {
            flags.push_str(" severe-wind");
        }
        if slot.moderate_wind {
            flags.push_str(" moderate-wind");
        }
        println!(
            "{index:3}  {duty:<8} #{:02x}{:02x}{:02x}{flags}",
            slot.base.r, slot.base.g, slot.base.b
        );
    }

    println!();
    println!(
        "{} lightning / {} severe wind / {} moderate wind slots",
        hazards.lightning.len(),
        hazards.severe_wind.len(),
        hazards.moderate_wind.len()
    );

    Ok(())
}

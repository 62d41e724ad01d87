//! CLI tool to fetch current observations once and print how each station
//! would light up on the map.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use metarmap_awc::{AwcClient, PayloadFormat};
use metarmap_cli::{classification_row, header_row};
use metarmap_core::{parse_payload, WindRules};

/// Fetch METARs once and show the classification for each station
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Station identifiers (ICAO), e.g. KSEA KPDX
    #[arg(required = true)]
    stations: Vec<String>,

    /// Data API base URL
    #[arg(long, default_value = "https://aviationweather.gov")]
    url: String,

    /// Request the tagged XML payload instead of JSON
    #[arg(long)]
    xml: bool,

    /// Moderate wind threshold in knots
    #[arg(long, default_value_t = 15)]
    moderate_kt: u32,

    /// Severe wind threshold in knots
    #[arg(long, default_value_t = 25)]
    severe_kt: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let rules = WindRules {
        moderate_kt: args.moderate_kt,
        severe_kt: args.severe_kt,
    };
    anyhow::ensure!(
        rules.is_valid(),
        "severe threshold must not sit below the moderate one"
    );

    let format = if args.xml {
        PayloadFormat::Xml
    } else {
        PayloadFormat::Json
    };
    let stations: Vec<String> = args
        .stations
        .iter()
        .map(|code| code.trim().to_ascii_uppercase())
        .collect();

    println!(
        "Fetching {} stations from {} at {}",
        stations.len(),
        args.url,
        chrono::Utc::now().format("%Y-%m-%d %H:%MZ")
    );

    let client = AwcClient::new(
        &args.url,
        format,
        Duration::from_secs(10),
        Duration::from_secs(10),
    );
    let payload = client.fetch(&stations).await.context("fetch failed")?;
    let reports = parse_payload(&payload).context("could not parse payload")?;

    if reports.is_empty() {
        println!("No observations returned.");
        return Ok(());
    }

    println!();
    println!("{}", header_row());
    for report in &reports {
        println!("{}", classification_row(report, &rules));
    }

    let missing: Vec<&String> = stations
        .iter()
        .filter(|code| !reports.iter().any(|report| report.station_id == **code))
        .collect();
    if !missing.is_empty() {
        println!();
        for code in missing {
            println!("{code}: no current observation");
        }
    }

    Ok(())
}

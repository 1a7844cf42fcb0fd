//! Quote a booking from the command line.
//!
//! Reads a selections JSON document from the path given as the first
//! argument (or stdin) and prints the breakdown and summary as JSON.

use std::io::Read;

use anyhow::Context;
use serde_json::json;
use tracing::info;

use house_cleaning_booking::config::AppConfig;
use house_cleaning_booking::display::SummaryView;
use house_cleaning_booking::pricing::Selections;
use house_cleaning_booking::telemetry;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log_level)?;

    let pricing = config.pricing()?;
    info!(
        "Pricing {} service tiers, unknown services: {:?}",
        pricing.services.iter().count(),
        pricing.unknown_service
    );

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read selections from {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read selections from stdin")?;
            buffer
        }
    };

    let selections: Selections =
        serde_json::from_str(&input).context("selections are not valid JSON")?;
    let breakdown = pricing.quote(&selections)?;
    let summary = SummaryView::new(&breakdown);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "breakdown": breakdown,
            "summary": summary,
        }))?
    );
    Ok(())
}

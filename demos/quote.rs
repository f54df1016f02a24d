//! Quote Example
//!
//! Prices a booking against a facility fixture and prints the summary.
//!
//! Use `-f` to pick a facility fixture, `-c` for the customer class,
//! `--start`/`--end` for a day booking or `--from`/`--to` for an hourly one,
//! and `-i` (repeatable) or `--rental` for what to book.

use std::io;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use venue_quote::{
    config::{LogFormat, LoggingConfig, QuoteArgs},
    fixtures::Fixture,
};

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// Quote Example
pub fn main() -> Result<()> {
    let args = QuoteArgs::load()?;

    init_logging(&args.logging)?;

    let mut fixture = Fixture::with_base_path(&args.fixtures_dir);
    fixture.load_facility(&args.facility)?;

    let facility = fixture.facility(&args.facility)?;
    let request = args.request()?;

    args.validate_dates()?;

    let quote = args.engine().quote(facility, &request)?;

    info!(
        valid = quote.is_valid(),
        total = %quote.rounded_total(),
        "quote computed"
    );

    let stdout = io::stdout();
    quote.write_to(stdout.lock(), facility)?;

    if let Some(submitted) = args.submitted {
        match quote.confirm(submitted) {
            Ok(()) => info!(%submitted, "submitted total confirmed"),
            Err(err) => warn!(%err, "submitted total rejected"),
        }
    }

    Ok(())
}

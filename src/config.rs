//! Quote CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use jiff::civil::{Date, Time};
use rust_decimal::Decimal;

use crate::{
    customers::{BookingFlow, CustomerClass, CustomerClassError},
    quote::engine::{QuoteEngine, QuoteRequest, Selection},
    rates::MissingClassPolicy,
    schedule::{Schedule, ScheduleError, ensure_selectable, parse_clock, validate_start},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Price a booking against a facility fixture
#[derive(Debug, Parser)]
#[command(name = "quote", about = "Price a facility booking", long_about = None)]
pub struct QuoteArgs {
    /// Directory containing `facilities/<name>.yml`
    #[arg(long, env = "FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Facility fixture to price against
    #[arg(short, long, default_value = "grand-hall")]
    pub facility: String,

    /// Booking flow whose customer vocabulary `--class` uses
    #[arg(long, value_enum, default_value_t = BookingFlow::Venue)]
    pub flow: BookingFlow,

    /// Customer class (public/walk-in, private, corporate)
    #[arg(short, long, default_value = "public")]
    pub class: String,

    /// First booked date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,

    /// Last booked date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,

    /// Start time (HH:mm); switches to hourly pricing
    #[arg(long, value_parser = parse_clock, conflicts_with_all = ["start", "end"])]
    pub from: Option<Time>,

    /// End time (HH:mm)
    #[arg(long, value_parser = parse_clock, conflicts_with_all = ["start", "end"])]
    pub to: Option<Time>,

    /// Package or room id to book; repeat for several
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Book the whole facility with setup and cleaning fees instead of items
    #[arg(long, conflicts_with = "items")]
    pub rental: bool,

    /// How to price items without rates for the chosen class
    #[arg(long, value_enum, default_value_t = MissingClassPolicy::Zero)]
    pub missing_class: MissingClassPolicy,

    /// Today's date, used to reject past bookings
    #[arg(long)]
    pub today: Option<Date>,

    /// A client-submitted total to confirm against the quote
    #[arg(long)]
    pub submitted: Option<Decimal>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl QuoteArgs {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The schedule described by the arguments; clock times win over dates.
    pub fn schedule(&self) -> Schedule {
        if self.from.is_some() || self.to.is_some() {
            Schedule::Hours {
                start: self.from,
                end: self.to,
            }
        } else {
            Schedule::Days {
                start: self.start,
                end: self.end,
            }
        }
    }

    /// Date-picker checks on the requested dates: the start may not be after
    /// the end, nor before `--today` when one is given.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] describing the first rejected date.
    pub fn validate_dates(&self) -> Result<(), ScheduleError> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            validate_start(start, end)?;
        }

        if let (Some(start), Some(today)) = (self.start, self.today) {
            ensure_selectable(start, today)?;
        }

        Ok(())
    }

    /// The customer class, parsed in the chosen flow's vocabulary.
    ///
    /// # Errors
    ///
    /// Returns a [`CustomerClassError`] if the class is unknown to the flow.
    pub fn customer_class(&self) -> Result<CustomerClass, CustomerClassError> {
        CustomerClass::parse_in(self.flow, &self.class)
    }

    /// Build the quote request.
    ///
    /// # Errors
    ///
    /// Returns a [`CustomerClassError`] if the class is unknown to the flow.
    pub fn request(&self) -> Result<QuoteRequest, CustomerClassError> {
        let selection = if self.rental {
            Selection::Rental
        } else {
            Selection::items(self.items.iter().map(String::as_str))
        };

        Ok(QuoteRequest::new(
            self.customer_class()?,
            self.schedule(),
            selection,
        ))
    }

    /// Engine configured from the arguments.
    pub fn engine(&self) -> QuoteEngine {
        QuoteEngine::new().with_missing_class_policy(self.missing_class)
    }
}

//! Rates

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::customers::CustomerClass;

/// The kinds of rate a price table may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    /// Daily rate on Monday to Friday
    Weekday,

    /// Daily rate on Saturday and Sunday
    Weekend,

    /// Hourly rental rate for the whole facility
    Hourly,

    /// One-off setup fee
    Setup,

    /// One-off cleaning fee
    Cleaning,

    /// Flat daily rate
    PerDay,

    /// Flat hourly rate
    PerHour,
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RateKind::Weekday => "weekday",
            RateKind::Weekend => "weekend",
            RateKind::Hourly => "hourly",
            RateKind::Setup => "setup",
            RateKind::Cleaning => "cleaning",
            RateKind::PerDay => "perDay",
            RateKind::PerHour => "perHour",
        })
    }
}

/// Rates charged to a single customer class.
///
/// A missing rate means the charge does not apply; it is never the same as a
/// rate of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateSchedule {
    /// Daily rate on weekdays
    pub weekday: Option<Decimal>,

    /// Daily rate on weekends
    pub weekend: Option<Decimal>,

    /// Hourly facility rental rate
    pub hourly: Option<Decimal>,

    /// Setup fee, charged once per booking
    pub setup: Option<Decimal>,

    /// Cleaning fee, charged once per booking
    pub cleaning: Option<Decimal>,

    /// Flat daily rate
    pub per_day: Option<Decimal>,

    /// Flat hourly rate
    pub per_hour: Option<Decimal>,
}

impl RateSchedule {
    /// A schedule where every rate kind is defined as zero.
    pub const ZERO: RateSchedule = RateSchedule {
        weekday: Some(Decimal::ZERO),
        weekend: Some(Decimal::ZERO),
        hourly: Some(Decimal::ZERO),
        setup: Some(Decimal::ZERO),
        cleaning: Some(Decimal::ZERO),
        per_day: Some(Decimal::ZERO),
        per_hour: Some(Decimal::ZERO),
    };

    /// Look up a rate by kind.
    pub fn rate(&self, kind: RateKind) -> Option<Decimal> {
        match kind {
            RateKind::Weekday => self.weekday,
            RateKind::Weekend => self.weekend,
            RateKind::Hourly => self.hourly,
            RateKind::Setup => self.setup,
            RateKind::Cleaning => self.cleaning,
            RateKind::PerDay => self.per_day,
            RateKind::PerHour => self.per_hour,
        }
    }

    /// Set a rate by kind, returning the updated schedule.
    #[must_use]
    pub fn with(mut self, kind: RateKind, amount: Decimal) -> Self {
        let slot = match kind {
            RateKind::Weekday => &mut self.weekday,
            RateKind::Weekend => &mut self.weekend,
            RateKind::Hourly => &mut self.hourly,
            RateKind::Setup => &mut self.setup,
            RateKind::Cleaning => &mut self.cleaning,
            RateKind::PerDay => &mut self.per_day,
            RateKind::PerHour => &mut self.per_hour,
        };

        *slot = Some(amount);

        self
    }

    /// Whether any daily rate (flat or weekday/weekend) is defined.
    pub fn has_daily_rate(&self) -> bool {
        self.per_day.is_some() || self.weekday.is_some() || self.weekend.is_some()
    }

    /// Whether any hourly rate (flat or rental) is defined.
    pub fn has_hourly_rate(&self) -> bool {
        self.per_hour.is_some() || self.hourly.is_some()
    }
}

/// How to price an item whose table has no entry for the requested class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MissingClassPolicy {
    /// Treat every rate kind as zero.
    #[default]
    Zero,

    /// Report the item as "pricing not available".
    Unavailable,
}

/// Rates keyed by customer class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    classes: FxHashMap<CustomerClass, RateSchedule>,
}

impl PriceTable {
    /// Create an empty price table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the schedule for a class, returning the updated table.
    #[must_use]
    pub fn with_class(mut self, class: CustomerClass, schedule: RateSchedule) -> Self {
        self.insert(class, schedule);
        self
    }

    /// Add (or replace) the schedule for a class.
    pub fn insert(&mut self, class: CustomerClass, schedule: RateSchedule) {
        self.classes.insert(class, schedule);
    }

    /// Schedule for the given class, if one is defined.
    pub fn schedule(&self, class: CustomerClass) -> Option<&RateSchedule> {
        self.classes.get(&class)
    }

    /// Schedule for the given class, resolving a missing entry with `policy`.
    ///
    /// Returns `None` only when the entry is missing and the policy is
    /// [`MissingClassPolicy::Unavailable`].
    pub fn resolve(&self, class: CustomerClass, policy: MissingClassPolicy) -> Option<RateSchedule> {
        match (self.classes.get(&class), policy) {
            (Some(schedule), _) => Some(*schedule),
            (None, MissingClassPolicy::Zero) => Some(RateSchedule::ZERO),
            (None, MissingClassPolicy::Unavailable) => None,
        }
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

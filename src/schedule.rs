//! Booking Schedules
//!
//! Date and clock-time ranges a booking covers. Ranges are validated on
//! construction, so a [`DateRange`] or [`TimeRange`] always has `end >= start`.
//! The caller's raw input, where either bound may still be missing, is a
//! [`Schedule`].

use jiff::{
    ToSpan,
    civil::{Date, Time, Weekday},
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building a booking schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The end date is earlier than the start date.
    #[error("End date cannot be before start date")]
    EndBeforeStart {
        /// Requested start date
        start: Date,

        /// Requested end date
        end: Date,
    },

    /// The start date is later than the end date.
    #[error("Start date cannot be after end date")]
    StartAfterEnd {
        /// Requested start date
        start: Date,

        /// Requested end date
        end: Date,
    },

    /// The end time is earlier than the start time.
    #[error("End time {end} cannot be before start time {start}")]
    EndTimeBeforeStart {
        /// Requested start time
        start: Time,

        /// Requested end time
        end: Time,
    },

    /// A selected date is in the past.
    #[error("{date} is in the past")]
    PastDate {
        /// The rejected date
        date: Date,
    },

    /// A clock time was not in `HH:mm` form.
    #[error("Invalid clock time {0:?}, expected HH:mm")]
    InvalidClock(String),

    /// The booked span does not fit the supported range.
    #[error("booking span is out of range")]
    OutOfRange,

    /// Calendar arithmetic error.
    #[error(transparent)]
    Calendar(#[from] jiff::Error),
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
    days: u32,
}

impl DateRange {
    /// Create a new date range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::EndBeforeStart`]: `end` is earlier than `start`.
    /// - [`ScheduleError::Calendar`]: the span between the dates cannot be computed.
    /// - [`ScheduleError::OutOfRange`]: the span does not fit in a `u32` day count.
    pub fn new(start: Date, end: Date) -> Result<Self, ScheduleError> {
        validate_end(start, end)?;

        let elapsed = start.until(end)?.get_days();
        let days = u32::try_from(elapsed)
            .ok()
            .and_then(|days| days.checked_add(1))
            .ok_or(ScheduleError::OutOfRange)?;

        Ok(Self { start, end, days })
    }

    /// First booked date
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last booked date
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of booked days, both endpoints included. Never zero.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Every booked date, in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;

        self.start
            .series(1.day())
            .take_while(move |date| *date <= end)
    }
}

/// Clock-time range within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: Time,
    end: Time,
}

impl TimeRange {
    /// Create a new time range.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EndTimeBeforeStart`] if `end` is earlier than `start`.
    pub fn new(start: Time, end: Time) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::EndTimeBeforeStart { start, end });
        }

        Ok(Self { start, end })
    }

    /// Parse a time range from two `HH:mm` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either string is not a clock time or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    /// Start time
    pub fn start(&self) -> Time {
        self.start
    }

    /// End time
    pub fn end(&self) -> Time {
        self.end
    }

    /// Booked minutes, ignoring seconds.
    pub fn minutes(&self) -> i32 {
        minutes_of_day(self.end) - minutes_of_day(self.start)
    }

    /// Booked hours. Fractional hours are kept at full precision.
    pub fn hours(&self) -> Decimal {
        Decimal::from(self.minutes()) / Decimal::from(60)
    }
}

/// A resolved booking window: either whole days or clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingWindow {
    /// Priced per day
    Days(DateRange),

    /// Priced per hour
    Hours(TimeRange),
}

/// A schedule as entered by the caller; either bound may still be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// A start and end date.
    Days {
        /// First booked date
        start: Option<Date>,

        /// Last booked date
        end: Option<Date>,
    },

    /// A start and end clock time.
    Hours {
        /// Start time
        start: Option<Time>,

        /// End time
        end: Option<Time>,
    },
}

impl Schedule {
    /// A complete date schedule.
    pub fn days(start: Date, end: Date) -> Self {
        Schedule::Days {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A complete clock-time schedule.
    pub fn hours(start: Time, end: Time) -> Self {
        Schedule::Hours {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolve the schedule into a booking window.
    ///
    /// Returns `Ok(None)` if either bound is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if both bounds are present but inverted.
    pub fn window(&self) -> Result<Option<BookingWindow>, ScheduleError> {
        match *self {
            Schedule::Days {
                start: Some(start),
                end: Some(end),
            } => Ok(Some(BookingWindow::Days(DateRange::new(start, end)?))),
            Schedule::Hours {
                start: Some(start),
                end: Some(end),
            } => Ok(Some(BookingWindow::Hours(TimeRange::new(start, end)?))),
            Schedule::Days { .. } | Schedule::Hours { .. } => Ok(None),
        }
    }
}

/// Date-picker check for a newly chosen start date.
///
/// # Errors
///
/// Returns [`ScheduleError::StartAfterEnd`] if `start` is after `end`.
pub fn validate_start(start: Date, end: Date) -> Result<(), ScheduleError> {
    if start > end {
        return Err(ScheduleError::StartAfterEnd { start, end });
    }

    Ok(())
}

/// Date-picker check for a newly chosen end date.
///
/// # Errors
///
/// Returns [`ScheduleError::EndBeforeStart`] if `end` is before `start`.
pub fn validate_end(start: Date, end: Date) -> Result<(), ScheduleError> {
    if end < start {
        return Err(ScheduleError::EndBeforeStart { start, end });
    }

    Ok(())
}

/// Whether a date may be picked, given the caller's idea of today.
pub fn is_selectable(date: Date, today: Date) -> bool {
    date >= today
}

/// Reject dates before `today`.
///
/// # Errors
///
/// Returns [`ScheduleError::PastDate`] if `date` is before `today`.
pub fn ensure_selectable(date: Date, today: Date) -> Result<(), ScheduleError> {
    if is_selectable(date, today) {
        Ok(())
    } else {
        Err(ScheduleError::PastDate { date })
    }
}

/// Saturdays and Sundays are weekend days.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Parse an `HH:mm` clock time.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidClock`] if the string is not a valid clock time.
pub fn parse_clock(s: &str) -> Result<Time, ScheduleError> {
    Time::strptime("%H:%M", s.trim()).map_err(|_err| ScheduleError::InvalidClock(s.to_string()))
}

fn minutes_of_day(time: Time) -> i32 {
    i32::from(time.hour()) * 60 + i32::from(time.minute())
}

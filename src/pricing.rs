//! Pricing
//!
//! Rate arithmetic shared by item and rental pricing. Everything here works at
//! full `Decimal` precision; rounding happens once, when a total is displayed.
//!
//! Charges are `Ok(None)` when no rate applies and an error when the amount
//! does not fit in a `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    rates::RateSchedule,
    schedule::{BookingWindow, DateRange, TimeRange, is_weekend},
};

/// Decimal places used for currency display
pub const MONEY_PLACES: u32 = 2;

/// Errors from rate arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A charge or total exceeds the range of `Decimal`.
    #[error("amount overflows the supported range")]
    Overflow,
}

/// Round an amount for display, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an amount and attach its currency.
pub fn to_money(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(round_money(amount), currency)
}

/// Sum amounts, failing on overflow.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum exceeds the range of `Decimal`.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, PricingError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(PricingError::Overflow)
}

fn checked_times(rate: Decimal, quantity: Decimal) -> Result<Decimal, PricingError> {
    rate.checked_mul(quantity).ok_or(PricingError::Overflow)
}

/// Charge for a run of whole days.
///
/// A flat `perDay` rate wins. Otherwise each date is charged its weekday or
/// weekend rate, and a date whose rate is missing makes the whole charge
/// unavailable.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the charge exceeds the range of `Decimal`.
pub fn daily_charge(rates: &RateSchedule, range: &DateRange) -> Result<Option<Decimal>, PricingError> {
    if !rates.has_daily_rate() {
        return Ok(None);
    }

    if let Some(per_day) = rates.per_day {
        return checked_times(per_day, Decimal::from(range.days())).map(Some);
    }

    let per_date: Option<Vec<Decimal>> = range
        .dates()
        .map(|date| {
            if is_weekend(date) {
                rates.weekend
            } else {
                rates.weekday
            }
        })
        .collect();

    per_date.map(checked_sum).transpose()
}

/// Charge for a line item over a run of clock hours: `perHour`, else `hourly`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the charge exceeds the range of `Decimal`.
pub fn hourly_charge(rates: &RateSchedule, range: &TimeRange) -> Result<Option<Decimal>, PricingError> {
    if !rates.has_hourly_rate() {
        return Ok(None);
    }

    rates
        .per_hour
        .or(rates.hourly)
        .map(|rate| checked_times(rate, range.hours()))
        .transpose()
}

/// Whole-facility rental charge over a run of clock hours: `hourly`, else `perHour`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the charge exceeds the range of `Decimal`.
pub fn rental_hourly_charge(
    rates: &RateSchedule,
    range: &TimeRange,
) -> Result<Option<Decimal>, PricingError> {
    if !rates.has_hourly_rate() {
        return Ok(None);
    }

    rates
        .hourly
        .or(rates.per_hour)
        .map(|rate| checked_times(rate, range.hours()))
        .transpose()
}

/// Charge for a line item over any booking window.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the charge exceeds the range of `Decimal`.
pub fn item_charge(rates: &RateSchedule, window: &BookingWindow) -> Result<Option<Decimal>, PricingError> {
    match window {
        BookingWindow::Days(range) => daily_charge(rates, range),
        BookingWindow::Hours(range) => hourly_charge(rates, range),
    }
}

/// Charge for a whole-facility rental over any booking window, before fees.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the charge exceeds the range of `Decimal`.
pub fn rental_charge(
    rates: &RateSchedule,
    window: &BookingWindow,
) -> Result<Option<Decimal>, PricingError> {
    match window {
        BookingWindow::Days(range) => daily_charge(rates, range),
        BookingWindow::Hours(range) => rental_hourly_charge(rates, range),
    }
}

//! Quotes
//!
//! A [`Quote`] is the priced, never persisted summary of a candidate booking.
//! Invalid user input (missing dates, an empty or unknown selection) is
//! reported as an invalid quote with an [`InvalidReason`]; only contract
//! violations by the caller surface as [`QuoteError`].

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::ItemId,
    customers::CustomerClass,
    pricing::{PricingError, checked_sum, round_money, to_money},
    schedule::ScheduleError,
};

pub mod engine;
pub mod render;

/// Errors reserved for caller contract violations.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The facility has no pricing for the requested customer class.
    #[error("facility {facility:?} does not price customer class {class}")]
    UndefinedClass {
        /// Facility name
        facility: String,

        /// Requested class
        class: CustomerClass,
    },

    /// The schedule bounds are inverted or cannot be computed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A charge or total does not fit in a `Decimal`.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A submitted total does not match the recomputed quote.
    #[error("submitted total {submitted} does not match quoted total {expected}")]
    TotalMismatch {
        /// Total computed by the engine, rounded for display
        expected: Decimal,

        /// Total the client submitted
        submitted: Decimal,
    },

    /// An invalid quote cannot be confirmed.
    #[error("quote is not valid: {0}")]
    NotConfirmable(InvalidReason),
}

/// Why a selection could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// One or both schedule bounds are missing.
    MissingDateRange,

    /// No package or room was selected.
    EmptySelection,

    /// A selected id has no matching catalog entry.
    InvalidItemReference,

    /// The facility defines no rental rate for the class and window.
    UnpricedCombination,
}

impl InvalidReason {
    /// Stable reason code for UI messaging.
    pub fn code(self) -> &'static str {
        match self {
            InvalidReason::MissingDateRange => "missing-dates",
            InvalidReason::EmptySelection => "empty-selection",
            InvalidReason::InvalidItemReference => "invalid-item-ids",
            InvalidReason::UnpricedCombination => "unpriced-combination",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether a quote could be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    /// Every condition for pricing was met.
    Valid,

    /// The selection could not be priced.
    Invalid(InvalidReason),
}

/// Price of one selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPrice {
    /// Subtotal at full precision
    Priced(Decimal),

    /// No applicable rate: "pricing not available", distinct from a zero charge.
    Unavailable,
}

impl ItemPrice {
    /// The subtotal, if the item could be priced.
    pub fn amount(self) -> Option<Decimal> {
        match self {
            ItemPrice::Priced(amount) => Some(amount),
            ItemPrice::Unavailable => None,
        }
    }

    /// Whether the item could not be priced.
    pub fn is_unavailable(self) -> bool {
        matches!(self, ItemPrice::Unavailable)
    }
}

impl fmt::Display for ItemPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemPrice::Priced(amount) => write!(f, "{amount}"),
            ItemPrice::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Whole-facility rental charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fees {
    /// Rental charge for the booked window
    pub rental: Decimal,

    /// Setup fee, zero if the facility charges none
    pub setup: Decimal,

    /// Cleaning fee, zero if the facility charges none
    pub cleaning: Decimal,
}

impl Fees {
    /// Sum of every charge.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the sum exceeds the range of `Decimal`.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        checked_sum([self.rental, self.setup, self.cleaning])
    }
}

/// A priced booking summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    status: QuoteStatus,
    class: CustomerClass,
    per_item: BTreeMap<ItemId, ItemPrice>,
    fees: Option<Fees>,
    total: Decimal,
    currency: &'static Currency,
}

impl Quote {
    /// An invalid quote: no lines, no fees, a total of zero.
    pub fn invalid(
        reason: InvalidReason,
        class: CustomerClass,
        currency: &'static Currency,
    ) -> Self {
        Self {
            status: QuoteStatus::Invalid(reason),
            class,
            per_item: BTreeMap::new(),
            fees: None,
            total: Decimal::ZERO,
            currency,
        }
    }

    /// A valid package-and-room quote; the total sums every priced item.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total exceeds the range of `Decimal`.
    pub fn for_items(
        per_item: BTreeMap<ItemId, ItemPrice>,
        class: CustomerClass,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        let total = checked_sum(per_item.values().filter_map(|price| price.amount()))?;

        Ok(Self {
            status: QuoteStatus::Valid,
            class,
            per_item,
            fees: None,
            total,
            currency,
        })
    }

    /// A valid whole-facility rental quote.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total exceeds the range of `Decimal`.
    pub fn for_rental(
        fees: Fees,
        class: CustomerClass,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            status: QuoteStatus::Valid,
            class,
            per_item: BTreeMap::new(),
            fees: Some(fees),
            total: fees.total()?,
            currency,
        })
    }

    /// Valid or invalid, with the reason
    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Whether the selection could be priced
    pub fn is_valid(&self) -> bool {
        self.status == QuoteStatus::Valid
    }

    /// Why the selection could not be priced, if it couldn't
    pub fn reason(&self) -> Option<InvalidReason> {
        match self.status {
            QuoteStatus::Valid => None,
            QuoteStatus::Invalid(reason) => Some(reason),
        }
    }

    /// Customer class the quote was priced for
    pub fn class(&self) -> CustomerClass {
        self.class
    }

    /// Price of every selected item
    pub fn per_item(&self) -> &BTreeMap<ItemId, ItemPrice> {
        &self.per_item
    }

    /// Price of one selected item
    pub fn item(&self, id: &str) -> Option<ItemPrice> {
        self.per_item.get(id).copied()
    }

    /// Selected items that could not be priced
    pub fn unavailable_items(&self) -> impl Iterator<Item = &ItemId> {
        self.per_item
            .iter()
            .filter(|(_, price)| price.is_unavailable())
            .map(|(id, _)| id)
    }

    /// Rental charges, for whole-facility quotes
    pub fn fees(&self) -> Option<&Fees> {
        self.fees.as_ref()
    }

    /// Grand total at full precision
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Grand total rounded for display
    pub fn rounded_total(&self) -> Decimal {
        round_money(self.total)
    }

    /// Grand total as money, rounded for display
    pub fn display_total(&self) -> Money<'static, Currency> {
        to_money(self.total, self.currency)
    }

    /// Currency of every amount in the quote
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Confirm a client-submitted total against this (recomputed) quote.
    ///
    /// Client totals are advisory; the amount charged must match the quote
    /// once both are rounded for display.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::NotConfirmable`]: this quote is invalid.
    /// - [`QuoteError::TotalMismatch`]: the submitted total differs.
    pub fn confirm(&self, submitted: Decimal) -> Result<(), QuoteError> {
        if let QuoteStatus::Invalid(reason) = self.status {
            return Err(QuoteError::NotConfirmable(reason));
        }

        let expected = self.rounded_total();

        if round_money(submitted) != expected {
            return Err(QuoteError::TotalMismatch {
                expected,
                submitted,
            });
        }

        Ok(())
    }
}

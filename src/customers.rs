//! Customer Classes
//!
//! The pricing tier a booking is billed under. Booking flows spell the tiers
//! differently, so every external label goes through [`BookingFlow`] before
//! it reaches the engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while translating external customer labels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerClassError {
    /// The label matches no known customer class.
    #[error("unknown customer class: {0}")]
    Unknown(String),

    /// The label is known, but not part of the given booking flow's vocabulary.
    #[error("customer class {label:?} is not used by the {flow} flow")]
    NotInFlow {
        /// The label that was rejected
        label: String,

        /// Flow whose vocabulary was expected
        flow: BookingFlow,
    },
}

/// Canonical customer classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomerClass {
    /// Members of the public (also called walk-in customers).
    Public,

    /// Private individuals booking for themselves.
    Private,

    /// Companies and organisations.
    Corporate,
}

impl CustomerClass {
    /// Every class, in display order.
    pub const ALL: [CustomerClass; 3] = [
        CustomerClass::Public,
        CustomerClass::Private,
        CustomerClass::Corporate,
    ];

    /// Render this class using the vocabulary of the given booking flow.
    pub fn label(self, flow: BookingFlow) -> &'static str {
        match (self, flow) {
            (CustomerClass::Public, BookingFlow::Venue) => "public",
            (CustomerClass::Public, BookingFlow::WalkIn) => "walk-in",
            (CustomerClass::Private, _) => "private",
            (CustomerClass::Corporate, _) => "corporate",
        }
    }

    /// Parse a label strictly within one booking flow's vocabulary.
    ///
    /// # Errors
    ///
    /// - [`CustomerClassError::Unknown`]: the label matches no class at all.
    /// - [`CustomerClassError::NotInFlow`]: the label belongs to the other flow.
    pub fn parse_in(flow: BookingFlow, label: &str) -> Result<Self, CustomerClassError> {
        let class = label.parse::<CustomerClass>()?;

        if class.label(flow).eq_ignore_ascii_case(label.trim()) {
            Ok(class)
        } else {
            Err(CustomerClassError::NotInFlow {
                label: label.to_string(),
                flow,
            })
        }
    }
}

impl fmt::Display for CustomerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(BookingFlow::Venue))
    }
}

impl FromStr for CustomerClass {
    type Err = CustomerClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "walk-in" | "walkin" | "walk_in" => Ok(CustomerClass::Public),
            "private" => Ok(CustomerClass::Private),
            "corporate" => Ok(CustomerClass::Corporate),
            _ => Err(CustomerClassError::Unknown(s.to_string())),
        }
    }
}

impl Serialize for CustomerClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label(BookingFlow::Venue))
    }
}

impl<'de> Deserialize<'de> for CustomerClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;

        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Booking flows, each with its own customer vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BookingFlow {
    /// Venue booking: `public`, `private`, `corporate`.
    Venue,

    /// Front-desk booking: `walk-in`, `private`, `corporate`.
    WalkIn,
}

impl fmt::Display for BookingFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingFlow::Venue => f.write_str("venue"),
            BookingFlow::WalkIn => f.write_str("walk-in"),
        }
    }
}

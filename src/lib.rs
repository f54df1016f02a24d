//! Venue Quote
//!
//! Venue Quote prices bookings of rentable facilities (halls, rooms, event
//! spaces). Given a facility's tiered price list, a customer class, a booking
//! window and a selection of packages and rooms (or the whole facility), it
//! produces a [`Quote`](quote::Quote): per-item subtotals, flat fees and a
//! grand total.
//!
//! Quotes are advisory. A backend that charges a booking recomputes the quote
//! and confirms the submitted amount with [`Quote::confirm`](quote::Quote::confirm).

pub mod catalog;
pub mod config;
pub mod customers;
pub mod fixtures;
pub mod navigation;
pub mod prelude;
pub mod pricing;
pub mod quote;
pub mod rates;
pub mod schedule;

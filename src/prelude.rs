//! Venue Quote prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, Facility, ItemId, ItemKind, LineItem},
    customers::{BookingFlow, CustomerClass, CustomerClassError},
    quote::{
        Fees, InvalidReason, ItemPrice, Quote, QuoteError, QuoteStatus,
        engine::{QuoteEngine, QuoteRequest, Selection, compute_quote},
        render::RenderError,
    },
    pricing::PricingError,
    rates::{MissingClassPolicy, PriceTable, RateKind, RateSchedule},
    schedule::{BookingWindow, DateRange, Schedule, ScheduleError, TimeRange},
};

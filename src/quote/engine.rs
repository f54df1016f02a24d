//! Quote Engine
//!
//! Turns a [`QuoteRequest`] and a [`Facility`] into a [`Quote`]. The engine
//! holds only configuration, reads no clock and performs no I/O, so it can be
//! called as often and from as many threads as needed.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::{
    catalog::{Facility, ItemId, LineItem},
    customers::CustomerClass,
    pricing::{PricingError, item_charge, rental_charge},
    quote::{Fees, InvalidReason, ItemPrice, Quote, QuoteError},
    rates::{MissingClassPolicy, RateSchedule},
    schedule::{BookingWindow, Schedule},
};

/// What is being booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Individually priced packages and rooms.
    Items(BTreeSet<ItemId>),

    /// The whole facility, priced with flat setup and cleaning fees.
    Rental,
}

impl Selection {
    /// Select the given item ids.
    pub fn items<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Selection::Items(ids.into_iter().map(Into::into).collect())
    }
}

/// A booking session's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Pricing tier
    pub class: CustomerClass,

    /// Booked dates or clock times
    pub schedule: Schedule,

    /// Items or whole-facility rental
    pub selection: Selection,
}

impl QuoteRequest {
    /// Create a new request.
    pub fn new(class: CustomerClass, schedule: Schedule, selection: Selection) -> Self {
        Self {
            class,
            schedule,
            selection,
        }
    }
}

/// Quote engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteEngine {
    missing_class: MissingClassPolicy,
}

impl QuoteEngine {
    /// Create an engine with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how items without rates for the requested class are priced.
    #[must_use]
    pub fn with_missing_class_policy(mut self, policy: MissingClassPolicy) -> Self {
        self.missing_class = policy;
        self
    }

    /// Price a booking request.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::UndefinedClass`]: the facility does not price the requested class.
    /// - [`QuoteError::Schedule`]: the schedule bounds are inverted.
    /// - [`QuoteError::Pricing`]: a charge or the total overflows.
    #[instrument(
        name = "quote",
        skip_all,
        fields(facility = facility.name(), class = %request.class)
    )]
    pub fn quote(&self, facility: &Facility, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        let class = request.class;
        let currency = facility.currency();

        if !facility.offers(class) {
            return Err(QuoteError::UndefinedClass {
                facility: facility.name().to_string(),
                class,
            });
        }

        let Some(window) = request.schedule.window()? else {
            debug!("schedule is incomplete");
            return Ok(Quote::invalid(InvalidReason::MissingDateRange, class, currency));
        };

        match window {
            BookingWindow::Days(range) => {
                debug!(start = %range.start(), end = %range.end(), days = range.days(), "day window");
            }
            BookingWindow::Hours(range) => {
                debug!(start = %range.start(), end = %range.end(), hours = %range.hours(), "hour window");
            }
        }

        match &request.selection {
            Selection::Items(ids) => self.quote_items(facility, class, &window, ids),
            Selection::Rental => self.quote_rental(facility, class, &window),
        }
    }

    fn quote_items(
        &self,
        facility: &Facility,
        class: CustomerClass,
        window: &BookingWindow,
        ids: &BTreeSet<ItemId>,
    ) -> Result<Quote, QuoteError> {
        let currency = facility.currency();

        if ids.is_empty() {
            debug!("no items selected");
            return Ok(Quote::invalid(InvalidReason::EmptySelection, class, currency));
        }

        let catalog = facility.catalog();

        let lines: Option<Vec<&LineItem>> = ids.iter().map(|id| catalog.get(id.as_str())).collect();

        let Some(lines) = lines else {
            debug!(
                unknown = ?ids.iter().filter(|id| !catalog.contains(id.as_str())).collect::<Vec<_>>(),
                "selection references unknown items"
            );
            return Ok(Quote::invalid(InvalidReason::InvalidItemReference, class, currency));
        };

        let per_item: BTreeMap<ItemId, ItemPrice> = lines
            .into_iter()
            .map(|item| Ok((item.id().clone(), self.price_item(item, class, window)?)))
            .collect::<Result<_, PricingError>>()?;

        Ok(Quote::for_items(per_item, class, currency)?)
    }

    fn price_item(
        &self,
        item: &LineItem,
        class: CustomerClass,
        window: &BookingWindow,
    ) -> Result<ItemPrice, PricingError> {
        let charge = match item.pricing().resolve(class, self.missing_class) {
            Some(rates) => item_charge(&rates, window)?,
            None => None,
        };

        let Some(charge) = charge else {
            debug!(item = %item.id(), "no applicable rate");
            return Ok(ItemPrice::Unavailable);
        };

        Ok(ItemPrice::Priced(charge))
    }

    fn quote_rental(
        &self,
        facility: &Facility,
        class: CustomerClass,
        window: &BookingWindow,
    ) -> Result<Quote, QuoteError> {
        let currency = facility.currency();

        let fees = match facility.pricing().resolve(class, self.missing_class) {
            Some(rates) => rental_charge(&rates, window)?.map(|rental| rental_fees(&rates, rental)),
            None => None,
        };

        let Some(fees) = fees else {
            debug!("facility defines no rental rate");
            return Ok(Quote::invalid(InvalidReason::UnpricedCombination, class, currency));
        };

        Ok(Quote::for_rental(fees, class, currency)?)
    }
}

fn rental_fees(rates: &RateSchedule, rental: Decimal) -> Fees {
    Fees {
        rental,
        setup: rates.setup.unwrap_or_default(),
        cleaning: rates.cleaning.unwrap_or_default(),
    }
}

/// Price a booking request with the default engine options.
///
/// # Errors
///
/// See [`QuoteEngine::quote`].
pub fn compute_quote(facility: &Facility, request: &QuoteRequest) -> Result<Quote, QuoteError> {
    QuoteEngine::default().quote(facility, request)
}

impl Facility {
    /// Price a booking request with the default engine options.
    ///
    /// # Errors
    ///
    /// See [`QuoteEngine::quote`].
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        compute_quote(self, request)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};
    use rust_decimal_macros::dec;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        catalog::{Catalog, CatalogError},
        rates::{PriceTable, RateKind},
    };

    fn facility() -> Result<Facility, CatalogError> {
        let room_rates = PriceTable::new()
            .with_class(
                CustomerClass::Private,
                RateSchedule::default().with(RateKind::PerDay, dec!(1000)),
            )
            .with_class(
                CustomerClass::Corporate,
                RateSchedule::default().with(RateKind::PerHour, dec!(150)),
            );

        let package_rates = PriceTable::new().with_class(
            CustomerClass::Private,
            RateSchedule::default()
                .with(RateKind::Weekday, dec!(500))
                .with(RateKind::Weekend, dec!(800)),
        );

        let hall_rates = PriceTable::new()
            .with_class(
                CustomerClass::Corporate,
                RateSchedule::default()
                    .with(RateKind::Hourly, dec!(200))
                    .with(RateKind::Setup, dec!(250))
                    .with(RateKind::Cleaning, dec!(200)),
            )
            .with_class(
                CustomerClass::Private,
                RateSchedule::default().with(RateKind::Setup, dec!(100)),
            );

        let catalog = Catalog::with_items([
            LineItem::room("east", "East Wing", room_rates),
            LineItem::package("gala", "Gala Night", ["Hall", "Catering"], package_rates),
        ])?;

        Ok(Facility::new("Grand Hall", iso::USD, hall_rates, catalog))
    }

    fn days(start: (i16, i8, i8), end: (i16, i8, i8)) -> Schedule {
        Schedule::days(
            date(start.0, start.1, start.2),
            date(end.0, end.1, end.2),
        )
    }

    #[test]
    fn day_based_room_is_rate_times_inclusive_days() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 12)),
            Selection::items(["east"]),
        );

        let quote = facility.quote(&request)?;

        assert!(quote.is_valid());
        assert_eq!(quote.item("east"), Some(ItemPrice::Priced(dec!(3000))));
        assert_eq!(quote.total(), dec!(3000));

        Ok(())
    }

    #[test]
    fn hour_based_room_uses_fractional_hours() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Corporate,
            Schedule::hours(time(9, 0, 0, 0), time(10, 30, 0, 0)),
            Selection::items(["east"]),
        );

        assert_eq!(facility.quote(&request)?.total(), dec!(225));

        Ok(())
    }

    #[test]
    fn package_mixes_weekday_and_weekend_rates() -> TestResult {
        let facility = facility()?;
        // Friday to Sunday
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 14), (2025, 3, 16)),
            Selection::items(["gala", "east"]),
        );

        let quote = facility.quote(&request)?;

        assert_eq!(quote.item("gala"), Some(ItemPrice::Priced(dec!(2100))));
        assert_eq!(quote.total(), dec!(5100));

        Ok(())
    }

    #[test]
    fn missing_bound_is_missing_dates() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            Schedule::Days {
                start: Some(date(2025, 3, 10)),
                end: None,
            },
            Selection::items(["east"]),
        );

        let quote = facility.quote(&request)?;

        assert_eq!(quote.reason(), Some(InvalidReason::MissingDateRange));
        assert_eq!(quote.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn missing_dates_is_reported_before_empty_selection() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            Schedule::Hours {
                start: None,
                end: None,
            },
            Selection::Items(BTreeSet::new()),
        );

        assert_eq!(
            facility.quote(&request)?.reason(),
            Some(InvalidReason::MissingDateRange)
        );

        Ok(())
    }

    #[test]
    fn empty_selection_is_invalid() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 10)),
            Selection::Items(BTreeSet::new()),
        );

        let quote = facility.quote(&request)?;

        assert!(!quote.is_valid());
        assert_eq!(quote.reason().map(InvalidReason::code), Some("empty-selection"));
        assert_eq!(quote.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn unknown_item_invalidates_the_whole_selection() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 11)),
            Selection::items(["east", "ballroom"]),
        );

        let quote = facility.quote(&request)?;

        assert_eq!(quote.reason(), Some(InvalidReason::InvalidItemReference));
        assert!(quote.per_item().is_empty());
        assert_eq!(quote.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn unpriced_item_is_unavailable_not_zero() -> TestResult {
        let facility = facility()?;
        // The room has only an hourly rate for corporate customers.
        let request = QuoteRequest::new(
            CustomerClass::Corporate,
            days((2025, 3, 10), (2025, 3, 11)),
            Selection::items(["east"]),
        );

        let quote = facility.quote(&request)?;

        assert!(quote.is_valid());
        assert_eq!(quote.item("east"), Some(ItemPrice::Unavailable));
        assert_eq!(quote.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn missing_class_policy_controls_unlisted_classes() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Public,
            days((2025, 3, 10), (2025, 3, 11)),
            Selection::items(["east"]),
        );

        let zero = QuoteEngine::new().quote(&facility, &request)?;
        let unavailable = QuoteEngine::new()
            .with_missing_class_policy(MissingClassPolicy::Unavailable)
            .quote(&facility, &request)?;

        assert_eq!(zero.item("east"), Some(ItemPrice::Priced(Decimal::ZERO)));
        assert_eq!(unavailable.item("east"), Some(ItemPrice::Unavailable));

        Ok(())
    }

    #[test]
    fn rental_adds_setup_and_cleaning_fees() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Corporate,
            Schedule::hours(time(9, 0, 0, 0), time(13, 0, 0, 0)),
            Selection::Rental,
        );

        let quote = facility.quote(&request)?;

        assert_eq!(
            quote.fees(),
            Some(&Fees {
                rental: dec!(800),
                setup: dec!(250),
                cleaning: dec!(200),
            })
        );
        assert_eq!(quote.total(), dec!(1250));
        assert!(quote.per_item().is_empty());

        Ok(())
    }

    #[test]
    fn rental_without_rate_is_unpriced() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            Schedule::hours(time(9, 0, 0, 0), time(13, 0, 0, 0)),
            Selection::Rental,
        );

        let quote = facility.quote(&request)?;

        assert_eq!(quote.reason(), Some(InvalidReason::UnpricedCombination));
        assert_eq!(quote.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn rental_for_unlisted_class_follows_missing_class_policy() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Public,
            Schedule::hours(time(9, 0, 0, 0), time(13, 0, 0, 0)),
            Selection::Rental,
        );

        let zero = QuoteEngine::new().quote(&facility, &request)?;
        let unavailable = QuoteEngine::new()
            .with_missing_class_policy(MissingClassPolicy::Unavailable)
            .quote(&facility, &request)?;

        assert!(zero.is_valid());
        assert_eq!(zero.total(), Decimal::ZERO);
        assert_eq!(unavailable.reason(), Some(InvalidReason::UnpricedCombination));

        Ok(())
    }

    #[test]
    fn class_not_offered_is_a_contract_error() -> TestResult {
        let facility = facility()?.with_classes([CustomerClass::Corporate])?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 11)),
            Selection::items(["east"]),
        );

        assert!(matches!(
            facility.quote(&request),
            Err(QuoteError::UndefinedClass { class: CustomerClass::Private, .. })
        ));

        Ok(())
    }

    #[test]
    fn inverted_schedule_is_a_contract_error() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 12), (2025, 3, 10)),
            Selection::items(["east"]),
        );

        assert!(matches!(facility.quote(&request), Err(QuoteError::Schedule(_))));

        Ok(())
    }

    #[test]
    fn identical_requests_give_identical_quotes() -> TestResult {
        let facility = facility()?;
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 14), (2025, 3, 16)),
            Selection::items(["gala", "east"]),
        );

        assert_eq!(facility.quote(&request)?, facility.quote(&request)?);

        Ok(())
    }

    #[test]
    fn overflowing_rates_are_reported_not_panicked() -> TestResult {
        let rates = PriceTable::new().with_class(
            CustomerClass::Private,
            RateSchedule::default().with(RateKind::PerDay, Decimal::MAX),
        );
        let catalog = Catalog::with_items([LineItem::room("vault", "Vault", rates)])?;
        let facility = Facility::new("Treasury", iso::USD, PriceTable::new(), catalog);
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 11)),
            Selection::items(["vault"]),
        );

        assert!(matches!(
            facility.quote(&request),
            Err(QuoteError::Pricing(PricingError::Overflow))
        ));

        Ok(())
    }

    #[test]
    fn item_totals_that_overflow_are_reported() -> TestResult {
        let rates = PriceTable::new().with_class(
            CustomerClass::Private,
            RateSchedule::default().with(RateKind::PerDay, Decimal::MAX),
        );
        let catalog = Catalog::with_items([
            LineItem::room("north", "North Vault", rates.clone()),
            LineItem::room("south", "South Vault", rates),
        ])?;
        let facility = Facility::new("Treasury", iso::USD, PriceTable::new(), catalog);
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 10), (2025, 3, 10)),
            Selection::items(["north", "south"]),
        );

        assert!(matches!(
            facility.quote(&request),
            Err(QuoteError::Pricing(PricingError::Overflow))
        ));

        Ok(())
    }

    #[test]
    fn engine_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Facility>();
        assert_send_sync::<QuoteEngine>();
        assert_send_sync::<QuoteRequest>();
        assert_send_sync::<Quote>();
    }

    #[test]
    fn concurrent_quotes_match_a_single_threaded_quote() -> TestResult {
        let facility = facility()?;
        let engine = QuoteEngine::new();
        let request = QuoteRequest::new(
            CustomerClass::Private,
            days((2025, 3, 14), (2025, 3, 16)),
            Selection::items(["gala", "east"]),
        );
        let expected = engine.quote(&facility, &request)?;

        let quotes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| engine.quote(&facility, &request)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        assert_eq!(quotes.len(), 8);

        for quote in quotes {
            let quote = quote.map_err(|_panic| "quote thread panicked")??;

            assert_eq!(quote, expected);
        }

        Ok(())
    }
}

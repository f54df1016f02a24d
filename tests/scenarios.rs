//! Booking scenarios priced against the `grand-hall` fixture.
//!
//! Grand Hall (USD):
//!
//! - East Wing: private 1000/day, corporate 1200/day or 180/hour,
//!   public 400 weekdays / 550 weekends
//! - Boardroom: corporate 90/hour only
//! - Wedding Package: private 2500/day, corporate 3000/day
//! - Conference Package: corporate 1800/day or 250/hour
//! - Whole-hall rental: corporate 200/hour + 250 setup + 200 cleaning,
//!   public 1200 weekdays / 1600 weekends + 150 setup

use jiff::civil::{date, time};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use testresult::TestResult;

use venue_quote::{fixtures::Fixture, prelude::*};

fn grand_hall() -> TestResult<Facility> {
    let fixture = Fixture::from_set("grand-hall")?;

    Ok(fixture.facility("grand-hall")?.clone())
}

#[test]
fn private_room_over_three_days() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Private,
        Schedule::days(date(2025, 5, 5), date(2025, 5, 7)),
        Selection::items(["east-wing"]),
    );

    let quote = compute_quote(&facility, &request)?;

    assert!(quote.is_valid());
    assert_eq!(quote.total(), dec!(3000));

    Ok(())
}

#[test]
fn corporate_hall_rental_with_fees() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Corporate,
        Schedule::hours(time(9, 0, 0, 0), time(13, 0, 0, 0)),
        Selection::Rental,
    );

    let quote = compute_quote(&facility, &request)?;
    let fees = quote.fees().copied();

    assert_eq!(fees.map(|fees| fees.rental), Some(dec!(800)));
    assert_eq!(quote.total(), dec!(1250));

    Ok(())
}

#[test]
fn unknown_item_id_is_invalid() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Private,
        Schedule::days(date(2025, 5, 5), date(2025, 5, 7)),
        Selection::items(["east-wing", "ballroom"]),
    );

    let quote = compute_quote(&facility, &request)?;

    assert!(!quote.is_valid());
    assert_eq!(quote.reason().map(InvalidReason::code), Some("invalid-item-ids"));
    assert_eq!(quote.total(), Decimal::ZERO);

    Ok(())
}

#[test]
fn unpriced_item_is_excluded_from_total() -> TestResult {
    let facility = grand_hall()?;
    // The boardroom only has an hourly rate.
    let request = QuoteRequest::new(
        CustomerClass::Corporate,
        Schedule::days(date(2025, 5, 5), date(2025, 5, 6)),
        Selection::items(["boardroom", "east-wing"]),
    );

    let quote = compute_quote(&facility, &request)?;

    assert!(quote.is_valid());
    assert_eq!(quote.item("boardroom"), Some(ItemPrice::Unavailable));
    assert_eq!(quote.item("east-wing"), Some(ItemPrice::Priced(dec!(2400))));
    assert_eq!(quote.total(), dec!(2400));

    Ok(())
}

#[test]
fn daily_total_is_sum_of_rate_times_days() -> TestResult {
    let facility = grand_hall()?;
    let start = date(2025, 5, 1);

    for span in 0..10 {
        let end = start.checked_add(jiff::Span::new().days(span))?;
        let days = DateRange::new(start, end)?.days();
        let request = QuoteRequest::new(
            CustomerClass::Private,
            Schedule::days(start, end),
            Selection::items(["wedding", "east-wing"]),
        );

        let quote = compute_quote(&facility, &request)?;

        assert_eq!(
            quote.total(),
            (dec!(2500) + dec!(1000)) * Decimal::from(days),
            "span of {days} days"
        );
    }

    Ok(())
}

#[test]
fn same_day_booking_charges_one_day() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Corporate,
        Schedule::days(date(2025, 5, 5), date(2025, 5, 5)),
        Selection::items(["wedding"]),
    );

    assert_eq!(compute_quote(&facility, &request)?.total(), dec!(3000));

    Ok(())
}

#[test]
fn empty_selection_is_invalid() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Private,
        Schedule::days(date(2025, 5, 5), date(2025, 5, 5)),
        Selection::items(Vec::<String>::new()),
    );

    let quote = compute_quote(&facility, &request)?;

    assert_eq!(quote.reason().map(InvalidReason::code), Some("empty-selection"));
    assert_eq!(quote.total(), Decimal::ZERO);

    Ok(())
}

#[test]
fn weekend_rates_apply_on_saturdays_and_sundays() -> TestResult {
    let facility = grand_hall()?;
    // Friday 2025-03-14 to Sunday 2025-03-16
    let schedule = Schedule::days(date(2025, 3, 14), date(2025, 3, 16));

    let room = compute_quote(
        &facility,
        &QuoteRequest::new(CustomerClass::Public, schedule, Selection::items(["east-wing"])),
    )?;
    let rental = compute_quote(
        &facility,
        &QuoteRequest::new(CustomerClass::Public, schedule, Selection::Rental),
    )?;

    assert_eq!(room.total(), dec!(1500));
    assert_eq!(rental.total(), dec!(4550));
    assert_eq!(rental.fees().map(|fees| fees.cleaning), Some(Decimal::ZERO));

    Ok(())
}

#[test]
fn hourly_items_use_fractional_hours() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Corporate,
        Schedule::hours(time(9, 0, 0, 0), time(10, 30, 0, 0)),
        Selection::items(["conference", "east-wing"]),
    );

    let quote = compute_quote(&facility, &request)?;

    assert_eq!(quote.item("conference"), Some(ItemPrice::Priced(dec!(375))));
    assert_eq!(quote.item("east-wing"), Some(ItemPrice::Priced(dec!(270))));
    assert_eq!(quote.total(), dec!(645));

    Ok(())
}

#[test]
fn requoting_is_idempotent_and_confirms() -> TestResult {
    let facility = grand_hall()?;
    let request = QuoteRequest::new(
        CustomerClass::Corporate,
        Schedule::hours(time(9, 0, 0, 0), time(13, 0, 0, 0)),
        Selection::Rental,
    );

    let client = compute_quote(&facility, &request)?;
    let server = compute_quote(&facility, &request)?;

    assert_eq!(client, server);
    server.confirm(client.rounded_total())?;
    assert!(server.confirm(dec!(1)).is_err());

    Ok(())
}

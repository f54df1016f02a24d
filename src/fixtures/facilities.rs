//! Facility Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, Facility, LineItem},
    customers::CustomerClass,
    fixtures::FixtureError,
    rates::{PriceTable, RateKind, RateSchedule},
};

/// Facility fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacilityFixture {
    /// Facility name
    pub name: String,

    /// ISO currency code (e.g., "USD")
    pub currency: String,

    /// Customer classes the facility prices for; all classes when omitted
    #[serde(default)]
    pub classes: Option<Vec<CustomerClass>>,

    /// Whole-facility rental rates
    #[serde(default)]
    pub pricing: PricingFixture,

    /// Map of package id -> package fixture
    #[serde(default)]
    pub packages: FxHashMap<String, PackageFixture>,

    /// Map of room id -> room fixture
    #[serde(default)]
    pub rooms: FxHashMap<String, RoomFixture>,
}

/// Rates keyed by customer class label, in either booking flow's vocabulary
pub type PricingFixture = FxHashMap<String, RatesFixture>;

/// Package fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageFixture {
    /// Display name
    pub name: String,

    /// Bundled services
    #[serde(default)]
    pub includes: Vec<String>,

    /// Per-class rates
    #[serde(default)]
    pub pricing: PricingFixture,
}

/// Room fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomFixture {
    /// Display name
    pub name: String,

    /// Per-class rates
    #[serde(default)]
    pub pricing: PricingFixture,
}

/// Rates for one customer class, as display strings (e.g., "$200/hour")
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RatesFixture {
    /// Weekday daily rate
    pub weekday: Option<String>,

    /// Weekend daily rate
    pub weekend: Option<String>,

    /// Hourly rental rate
    pub hourly: Option<String>,

    /// Setup fee
    pub setup: Option<String>,

    /// Cleaning fee
    pub cleaning: Option<String>,

    /// Flat daily rate
    #[serde(alias = "per_day")]
    pub per_day: Option<String>,

    /// Flat hourly rate
    #[serde(alias = "per_hour")]
    pub per_hour: Option<String>,
}

impl RatesFixture {
    fn entries(&self) -> [(RateKind, Option<&String>); 7] {
        [
            (RateKind::Weekday, self.weekday.as_ref()),
            (RateKind::Weekend, self.weekend.as_ref()),
            (RateKind::Hourly, self.hourly.as_ref()),
            (RateKind::Setup, self.setup.as_ref()),
            (RateKind::Cleaning, self.cleaning.as_ref()),
            (RateKind::PerDay, self.per_day.as_ref()),
            (RateKind::PerHour, self.per_hour.as_ref()),
        ]
    }

    /// Parse every rate, checking any explicit currency against `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate is malformed or names a different currency.
    pub fn to_schedule(&self, currency: &'static Currency) -> Result<RateSchedule, FixtureError> {
        self.entries()
            .into_iter()
            .try_fold(RateSchedule::default(), |schedule, (kind, raw)| {
                let Some(raw) = raw else {
                    return Ok(schedule);
                };

                let (amount, rate_currency) = parse_rate(raw)?;

                if let Some(rate_currency) = rate_currency
                    && rate_currency != currency
                {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        rate_currency.iso_alpha_code.to_string(),
                    ));
                }

                Ok(schedule.with(kind, amount))
            })
    }
}

/// Two labels naming the same class (e.g. `public` and `walk-in`) are an error.
fn price_table(
    pricing: &PricingFixture,
    currency: &'static Currency,
) -> Result<PriceTable, FixtureError> {
    let mut labels: FxHashMap<CustomerClass, &str> = FxHashMap::default();

    pricing
        .iter()
        .try_fold(PriceTable::new(), |table, (label, rates)| {
            let class = label.parse::<CustomerClass>()?;

            if let Some(previous) = labels.insert(class, label) {
                return Err(FixtureError::DuplicateClass {
                    class,
                    first: previous.to_string(),
                    second: label.clone(),
                });
            }

            Ok(table.with_class(class, rates.to_schedule(currency)?))
        })
}

impl TryFrom<FacilityFixture> for Facility {
    type Error = FixtureError;

    fn try_from(fixture: FacilityFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;
        let mut catalog = Catalog::new();

        for (id, package) in fixture.packages {
            let pricing = price_table(&package.pricing, currency)?;

            catalog.insert(LineItem::package(id, package.name, package.includes, pricing))?;
        }

        for (id, room) in fixture.rooms {
            let pricing = price_table(&room.pricing, currency)?;

            catalog.insert(LineItem::room(id, room.name, pricing))?;
        }

        let pricing = price_table(&fixture.pricing, currency)?;
        let facility = Facility::new(fixture.name, currency, pricing, catalog);

        match fixture.classes {
            Some(classes) => Ok(facility.with_classes(classes)?),
            None => Ok(facility),
        }
    }
}

/// Parse a rate string into an amount and, if named, its currency.
///
/// Accepts the forms catalog data is stored in: `"1000"`, `"$250"`,
/// `"$200/hour"`, `"75/day"` and `"1,500.50 USD"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidRate`] if the amount cannot be parsed or is
/// negative, and [`FixtureError::UnknownCurrency`] for an unrecognised code.
pub fn parse_rate(s: &str) -> Result<(Decimal, Option<&'static Currency>), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let (amount, currency) = match parts.as_slice() {
        [amount] => (*amount, None),
        [amount, code] => (*amount, Some(parse_currency(code)?)),
        _ => return Err(FixtureError::InvalidRate(s.to_string())),
    };

    let amount = amount.trim_start_matches(['$', '£', '€', '₱']);
    let amount = ["/hour", "/hr", "/day"]
        .iter()
        .find_map(|unit| amount.strip_suffix(unit))
        .unwrap_or(amount)
        .replace(',', "");

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidRate(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidRate(s.to_string()));
    }

    Ok((amount, currency))
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not supported.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "PHP" => Ok(iso::PHP),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

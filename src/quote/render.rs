//! Quote Summary
//!
//! Terminal rendering of a priced booking summary.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Facility,
    pricing::to_money,
    quote::{ItemPrice, Quote, QuoteStatus},
};

/// Label printed for items without an applicable rate
pub const UNAVAILABLE_LABEL: &str = "Pricing not available";

/// Errors that can occur when writing a quote summary.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("failed to write quote summary: {0}")]
    Io(#[from] io::Error),
}

impl Quote {
    /// Write a summary table for the quote.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write, facility: &Facility) -> Result<(), RenderError> {
        writeln!(out, "{} ({} rates)", facility.name(), self.class())?;

        if let QuoteStatus::Invalid(reason) = self.status() {
            writeln!(out, "Quote unavailable: {reason}")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Kind", "Price"]);

        for (id, price) in self.per_item() {
            let (name, kind) = facility
                .catalog()
                .get(id.as_str())
                .map_or((id.as_str(), ""), |item| (item.name(), item.kind().label()));

            builder.push_record([name.to_string(), kind.to_string(), self.price_cell(*price)]);
        }

        if let Some(fees) = self.fees() {
            for (label, kind, amount) in [
                ("Rental", "rental", fees.rental),
                ("Setup", "fee", fees.setup),
                ("Cleaning", "fee", fees.cleaning),
            ] {
                builder.push_record([label.to_string(), kind.to_string(), self.money_cell(amount)]);
            }
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..3), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Total: {}", self.display_total())?;

        Ok(())
    }

    fn price_cell(&self, price: ItemPrice) -> String {
        match price {
            ItemPrice::Priced(amount) => self.money_cell(amount),
            ItemPrice::Unavailable => UNAVAILABLE_LABEL.to_string(),
        }
    }

    fn money_cell(&self, amount: Decimal) -> String {
        to_money(amount, self.currency()).to_string()
    }
}

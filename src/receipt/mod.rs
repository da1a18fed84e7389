//! Receipt

use std::io;

use decimal_percentage::Percentage;
use jiff::Zoned;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::MoneyError;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, ItemId},
    deals::DealGroup,
    pricing::{Price, line_total, sum_prices},
    register::Session,
};

mod render;

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A cart item or deal could not be found in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One line of the deals section.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRow {
    /// Index of the deal group this row belongs to.
    pub group: usize,

    /// Display label, e.g. `Soda (2)`.
    pub label: String,

    /// Item on this row.
    pub item: ItemId,

    /// Item name.
    pub item_name: String,

    /// Units on this row (2 when the first two slots of a group match).
    pub quantity: u32,

    /// Price of the units on this row.
    pub price: Price,

    /// Whether this is the free unit of the group.
    pub is_free: bool,
}

/// One line of the full price section.
#[derive(Debug, Clone, PartialEq)]
pub struct RemainingRow {
    /// Item on this row.
    pub item: ItemId,

    /// Item name.
    pub item_name: String,

    /// Units bought at full price.
    pub quantity: u32,

    /// `quantity` times the unit price.
    pub line_total: Price,
}

/// Final receipt for a checked out cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    deal_rows: Vec<DealRow>,
    remaining_rows: Vec<RemainingRow>,
    group_count: usize,
    savings: Price,
    total: Price,
    issued_at: Zoned,
}

impl Receipt {
    /// Build a receipt from a session whose deals have been resolved.
    ///
    /// Each deal group yields its paid rows (merged into one row of 2 when the
    /// first two slots are the same item) and a free row for the third slot.
    /// Every cart item with a quantity left after resolution is billed in full.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an item or deal is missing from the catalog.
    pub fn build(
        catalog: &Catalog,
        session: &Session,
        issued_at: Zoned,
    ) -> Result<Self, ReceiptError> {
        let deal_rows = deal_rows(catalog, session.deal_groups())?;

        let remaining_rows = session
            .lines()
            .filter(|&(_, quantity)| quantity > 0)
            .map(|(id, quantity)| {
                let item = catalog.get_item(id)?;

                Ok(RemainingRow {
                    item: id,
                    item_name: item.name().to_string(),
                    quantity,
                    line_total: line_total(item.price(), quantity),
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        let savings = sum_prices(deal_rows.iter().filter(|row| row.is_free).map(|row| &row.price))?;

        let total = sum_prices(
            deal_rows
                .iter()
                .filter(|row| !row.is_free)
                .map(|row| &row.price)
                .chain(remaining_rows.iter().map(|row| &row.line_total)),
        )?;

        Ok(Receipt {
            deal_rows,
            remaining_rows,
            group_count: session.deal_groups().len(),
            savings,
            total,
            issued_at,
        })
    }

    /// Rows of the deals section, grouped and in resolution order.
    pub fn deal_rows(&self) -> &[DealRow] {
        &self.deal_rows
    }

    /// Rows of the full price section, in scan order.
    pub fn remaining_rows(&self) -> &[RemainingRow] {
        &self.remaining_rows
    }

    /// Number of deal groups applied.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Returns true if at least one deal applied.
    pub fn has_deals(&self) -> bool {
        self.group_count > 0
    }

    /// Value of the free units.
    pub fn savings(&self) -> Price {
        self.savings
    }

    /// Grand total: everything that is paid for.
    pub fn total(&self) -> Price {
        self.total
    }

    /// Cost of the cart before deals were applied.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the addition fails.
    pub fn subtotal(&self) -> Result<Price, MoneyError> {
        self.total.add(self.savings)
    }

    /// Savings as a fraction of the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtotal cannot be calculated.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let subtotal_minor = self.subtotal()?.to_minor_units();
        let savings_minor = self.savings.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / subtotal_dec))
    }

    /// When the receipt was issued.
    pub fn issued_at(&self) -> &Zoned {
        &self.issued_at
    }
}

fn deal_rows(catalog: &Catalog, groups: &[DealGroup]) -> Result<Vec<DealRow>, ReceiptError> {
    let mut rows = Vec::with_capacity(groups.len() * 3);

    for (group_idx, group) in groups.iter().enumerate() {
        let [first, second] = group.paid();

        let paid: SmallVec<[(ItemId, u32); 2]> = if first == second {
            smallvec![(first, 2)]
        } else {
            smallvec![(first, 1), (second, 1)]
        };

        let slots = paid
            .into_iter()
            .map(|(id, quantity)| (id, quantity, false))
            .chain(std::iter::once((group.free(), 1, true)));

        for (id, quantity, is_free) in slots {
            let item = catalog.get_item(id)?;

            rows.push(DealRow {
                group: group_idx,
                label: format!("{} ({quantity})", item.name()),
                item: id,
                item_name: item.name().to_string(),
                quantity,
                price: line_total(item.price(), quantity),
                is_free,
            });
        }
    }

    Ok(rows)
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::Catalog,
        pricing::{cents, zero},
        register::Register,
    };

    use super::*;

    fn catalog() -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new();

        catalog.add_item("Soda", cents(100))?;
        catalog.add_item("Chips", cents(300))?;
        catalog.add_item("Salsa", cents(200))?;
        catalog.add_item("Guac", cents(400))?;
        catalog.add_item("Bread", cents(250))?;

        catalog.add_deal(&["Soda"])?;
        catalog.add_deal(&["Chips", "Salsa", "Guac"])?;

        Ok(catalog)
    }

    #[test]
    fn buy_two_get_one_receipt() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        register.scan_item("Soda", 5)?;

        let receipt = register.checkout()?;
        let soda = catalog.get_item_id("Soda").ok_or("missing soda")?;

        assert_eq!(
            receipt.deal_rows(),
            [
                DealRow {
                    group: 0,
                    label: "Soda (2)".to_string(),
                    item: soda,
                    item_name: "Soda".to_string(),
                    quantity: 2,
                    price: cents(200),
                    is_free: false,
                },
                DealRow {
                    group: 0,
                    label: "Soda (1)".to_string(),
                    item: soda,
                    item_name: "Soda".to_string(),
                    quantity: 1,
                    price: cents(100),
                    is_free: true,
                },
            ]
        );
        assert_eq!(
            receipt.remaining_rows(),
            [RemainingRow {
                item: soda,
                item_name: "Soda".to_string(),
                quantity: 2,
                line_total: cents(200),
            }]
        );
        assert_eq!(receipt.total(), cents(400));
        assert_eq!(receipt.savings(), cents(100));
        assert_eq!(receipt.subtotal()?, cents(500));

        Ok(())
    }

    #[test]
    fn cheapest_of_three_receipt() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        register.scan_item("Chips", 1)?;
        register.scan_item("Salsa", 1)?;
        register.scan_item("Guac", 1)?;

        let receipt = register.checkout()?;

        let labels: Vec<(&str, bool)> = receipt
            .deal_rows()
            .iter()
            .map(|row| (row.label.as_str(), row.is_free))
            .collect();

        assert_eq!(
            labels,
            [("Guac (1)", false), ("Chips (1)", false), ("Salsa (1)", true)]
        );
        assert!(receipt.remaining_rows().is_empty());
        assert_eq!(receipt.total(), cents(700));
        assert_eq!(receipt.savings(), cents(200));

        Ok(())
    }

    #[test]
    fn mixed_group_merges_leading_pair() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        register.scan_item("Guac", 2)?;
        register.scan_item("Salsa", 1)?;

        let receipt = register.checkout()?;

        let labels: Vec<&str> = receipt
            .deal_rows()
            .iter()
            .map(|row| row.label.as_str())
            .collect();

        assert_eq!(labels, ["Guac (2)", "Salsa (1)"]);
        assert_eq!(receipt.total(), cents(800));
        assert_eq!(receipt.savings(), cents(200));

        Ok(())
    }

    #[test]
    fn remaining_rows_follow_scan_order() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        register.scan_item("Bread", 2)?;
        register.scan_item("Chips", 1)?;
        register.scan_item("Soda", 1)?;

        let receipt = register.checkout()?;

        let names: Vec<&str> = receipt
            .remaining_rows()
            .iter()
            .map(|row| row.item_name.as_str())
            .collect();

        assert_eq!(names, ["Bread", "Chips", "Soda"]);
        assert!(!receipt.has_deals());
        assert_eq!(receipt.total(), cents(900));
        assert_eq!(receipt.savings(), zero());

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_subtotal() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        register.scan_item("Soda", 5)?;

        let receipt = register.checkout()?;

        assert_eq!(percent_points(receipt.savings_percent()?), Decimal::from(20));

        Ok(())
    }

    #[test]
    fn savings_percent_is_zero_for_empty_cart() -> TestResult {
        let catalog = catalog()?;
        let mut register = Register::new(&catalog);

        let receipt = register.checkout()?;

        assert_eq!(percent_points(receipt.savings_percent()?), Decimal::ZERO);
        assert_eq!(receipt.total(), zero());

        Ok(())
    }
}

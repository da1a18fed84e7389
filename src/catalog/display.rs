//! Catalog listings

use std::io;

use tabled::builder::Builder;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, DealKind},
    display::{TableLayout, write_rule, write_table},
};

const DEAL_TYPES_WIDTH: usize = 40;

impl Catalog {
    /// Writes every item with its unit price, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_items_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Price"]);

        for item in self.items() {
            builder.push_record([item.name().to_string(), format!("{} / unit", item.price())]);
        }

        write_table(out, "Supermarket Items", builder, &TableLayout::default())
    }

    /// Writes the deal types followed by every deal and its members, most
    /// expensive member first.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails, or if a deal refers to an
    /// item missing from the catalog.
    pub fn write_deals_to(&self, out: &mut impl io::Write) -> Result<(), DealListError> {
        let mut builder = Builder::default();

        builder.push_record(["Type", "Items"]);

        for deal in self.deals() {
            let names = deal
                .members()
                .iter()
                .map(|&id| self.get_item(id).map(|item| item.name()))
                .collect::<Result<Vec<_>, _>>()?;

            builder.push_record([deal.kind().code().to_string(), names.join(", ")]);
        }

        for kind in [DealKind::BuyTwoGetOneFree, DealKind::CheapestOfThreeFree] {
            writeln!(out, "Type {}: {}", kind.code(), kind.description())?;
        }
        write_rule(out, DEAL_TYPES_WIDTH)?;

        let layout = TableLayout {
            right_aligned_from: 2,
            ..TableLayout::default()
        };

        write_table(out, "Supermarket Deals", builder, &layout)?;

        Ok(())
    }
}

/// Errors raised while listing deals.
#[derive(Debug, Error)]
pub enum DealListError {
    /// A deal member is missing from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

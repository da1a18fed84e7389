//! Register
//!
//! A register scans a customer's items against a shared [`Catalog`], resolves
//! deals at checkout and hands back a [`Receipt`]. It serves one customer at a
//! time; checking out always starts a fresh session.

use std::io;

use jiff::Zoned;
use tabled::builder::Builder;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    display::{TableLayout, write_table},
    receipt::{Receipt, ReceiptError},
};

pub mod session;

pub use session::Session;

/// Most units of a single item one cart may hold.
pub const MAX_QUANTITY: u32 = 10_000;

/// Errors raised by register operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    /// The item is not sold here.
    #[error("item '{0}' does not exist in the catalog")]
    UnknownItem(String),

    /// Scanned quantities must be at least one.
    #[error("quantity {quantity} for item '{item}' must be an integer larger than 0")]
    InvalidQuantity {
        /// Item name as scanned
        item: String,
        /// Rejected quantity
        quantity: u32,
    },

    /// Scanning would take the item's cart quantity past [`MAX_QUANTITY`].
    #[error(
        "item '{item}' would reach {requested} units, the most one cart can hold is {max}",
        max = MAX_QUANTITY
    )]
    QuantityLimit {
        /// Item name as scanned
        item: String,
        /// Cart quantity the scan asked for
        requested: u64,
    },

    /// The item is not in the cart.
    #[error("item '{0}' is not currently in your cart")]
    ItemNotInCart(String),
}

/// Checkout register bound to a catalog.
#[derive(Debug)]
pub struct Register<'c> {
    catalog: &'c Catalog,
    session: Session,
}

impl<'c> Register<'c> {
    /// Create a register with an empty cart.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            session: Session::default(),
        }
    }

    /// The catalog this register prices against.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Scan `quantity` units of the named item. Returns the item's new cart quantity.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::InvalidQuantity`]: `quantity` is zero.
    /// - [`RegisterError::UnknownItem`]: the name is not in the catalog.
    /// - [`RegisterError::QuantityLimit`]: the item's cart quantity would exceed [`MAX_QUANTITY`].
    ///   The cart is left as it was.
    pub fn scan_item(&mut self, name: &str, quantity: u32) -> Result<u32, RegisterError> {
        if quantity < 1 {
            return Err(RegisterError::InvalidQuantity {
                item: name.to_string(),
                quantity,
            });
        }

        let item = self
            .catalog
            .item_by_name(name)
            .map_err(|_err| RegisterError::UnknownItem(name.to_string()))?;

        let current = self.session.quantity(item.id()).unwrap_or_default();
        let requested = u64::from(current) + u64::from(quantity);

        if requested > u64::from(MAX_QUANTITY) {
            return Err(RegisterError::QuantityLimit {
                item: name.to_string(),
                requested,
            });
        }

        let total = self
            .session
            .add(item.id(), quantity, item.deal())
            .ok_or_else(|| RegisterError::QuantityLimit {
                item: name.to_string(),
                requested,
            })?;

        debug!(item = %name, quantity, total, "scanned item");

        Ok(total)
    }

    /// Remove every unit of the named item from the cart. Returns the quantity removed.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::UnknownItem`]: the name is not in the catalog.
    /// - [`RegisterError::ItemNotInCart`]: the item has not been scanned.
    pub fn remove_item(&mut self, name: &str) -> Result<u32, RegisterError> {
        let id = self
            .catalog
            .get_item_id(name)
            .ok_or_else(|| RegisterError::UnknownItem(name.to_string()))?;

        let removed = self
            .session
            .remove(id)
            .ok_or_else(|| RegisterError::ItemNotInCart(name.to_string()))?;

        debug!(item = %name, removed, "removed item");

        Ok(removed)
    }

    /// Item names and quantities in the cart, in first-scan order.
    pub fn list_cart(&self) -> Vec<(&'c str, u32)> {
        // Session ids always come from this catalog.
        self.session
            .lines()
            .filter_map(|(id, quantity)| {
                self.catalog
                    .get_item(id)
                    .ok()
                    .map(|item| (item.name(), quantity))
            })
            .collect()
    }

    /// Resolve deals, build the receipt and clear the session.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the receipt cannot be priced. The session
    /// is cleared either way.
    pub fn checkout(&mut self) -> Result<Receipt, ReceiptError> {
        self.checkout_at(Zoned::now())
    }

    /// [`Register::checkout`] with an explicit receipt timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the receipt cannot be priced. The session
    /// is cleared either way.
    #[tracing::instrument(
        name = "register.checkout",
        skip(self, issued_at),
        fields(cart_items = self.session.len()),
        err
    )]
    pub fn checkout_at(&mut self, issued_at: Zoned) -> Result<Receipt, ReceiptError> {
        self.session.resolve_deals(self.catalog);

        let receipt = Receipt::build(self.catalog, &self.session, issued_at);

        self.session.clear();

        let receipt = receipt?;

        info!(
            deal_groups = receipt.group_count(),
            total = %receipt.total(),
            savings = %receipt.savings(),
            "checked out"
        );

        Ok(receipt)
    }

    /// Writes the cart as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_cart_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Quantity"]);

        for (name, quantity) in self.list_cart() {
            builder.push_record([name.to_string(), quantity.to_string()]);
        }

        write_table(out, "Your Cart", builder, &TableLayout::default())
    }
}

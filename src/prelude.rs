//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, CatalogItem, Deal, DealId, DealKind, ItemId},
    deals::DealGroup,
    loader::{LoadError, load_deals, load_items, load_shopping_list},
    names::{ReservedNames, canonicalize},
    pricing::{Price, PriceError, parse_price},
    receipt::{DealRow, Receipt, ReceiptError, RemainingRow},
    register::{Register, RegisterError, Session},
};

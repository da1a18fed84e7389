//! Catalog
//!
//! Items and deals live in append-only tables. An item's id is its index into
//! the item table and a deal's id is its index into the deal table; names are
//! resolved to ids through a separate index.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{names::ReservedNames, pricing::Price};

pub mod deal;
pub mod display;
pub mod item;

pub use deal::{Deal, DealKind};
pub use display::DealListError;
pub use item::CatalogItem;

/// Errors raised while building or querying a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The item name is one of the reserved command words.
    #[error("item name '{0}' is reserved and cannot be added to the catalog")]
    ReservedName(String),

    /// An item with this name already exists.
    #[error("item '{0}' already exists in the catalog")]
    DuplicateItem(String),

    /// No item has this name.
    #[error("item '{0}' does not exist in the catalog")]
    UnknownItem(String),

    /// No item has this id.
    #[error("item with id {0} does not exist")]
    InvalidItemId(ItemId),

    /// No deal has this id.
    #[error("deal with id {0} does not exist")]
    InvalidDealId(DealId),

    /// A deal was defined without any items.
    #[error("empty deals may not be added to the catalog")]
    EmptyDeal,

    /// The item already belongs to a deal (or is listed twice in the same deal).
    #[error("item '{0}' is already included in a deal and may not be included again")]
    ItemAlreadyInDeal(String),
}

/// Item id, dense from zero in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    /// Wrap a raw item index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the item in the catalog's item table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deal id, dense from zero in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DealId(usize);

impl DealId {
    /// Wrap a raw deal index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the deal in the catalog's deal table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store catalog of priced items and the deals they take part in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    item_ids: FxHashMap<String, ItemId>,
    deals: Vec<Deal>,
    reserved_names: ReservedNames,
}

impl Catalog {
    /// Create an empty catalog that rejects the default command keywords as item names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with a custom reserved name set.
    #[must_use]
    pub fn with_reserved_names(reserved_names: ReservedNames) -> Self {
        Self {
            reserved_names,
            ..Self::default()
        }
    }

    /// Add an item with the given (already canonical) name and unit price.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ReservedName`]: the name is a reserved command word.
    /// - [`CatalogError::DuplicateItem`]: an item with this name already exists.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        price: Price,
    ) -> Result<ItemId, CatalogError> {
        let name = name.into();

        if self.reserved_names.contains(&name) {
            return Err(CatalogError::ReservedName(name));
        }

        if self.item_ids.contains_key(&name) {
            return Err(CatalogError::DuplicateItem(name));
        }

        let id = ItemId::new(self.items.len());

        debug!(item_id = %id, item = %name, %price, "added catalog item");

        self.item_ids.insert(name.clone(), id);
        self.items.push(CatalogItem::new(id, name, price));

        Ok(id)
    }

    /// Add a deal over the named items.
    ///
    /// One item makes a buy-2-get-1-free deal, two or more make a
    /// cheapest-of-3-free deal. Members are stored most expensive first; items
    /// with equal prices keep the order they were listed in.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyDeal`]: no names were given.
    /// - [`CatalogError::UnknownItem`]: a name is not in the catalog.
    /// - [`CatalogError::ItemAlreadyInDeal`]: an item already belongs to a deal,
    ///   or is listed more than once.
    pub fn add_deal<S: AsRef<str>>(&mut self, names: &[S]) -> Result<DealId, CatalogError> {
        if names.is_empty() {
            return Err(CatalogError::EmptyDeal);
        }

        let mut members: SmallVec<[ItemId; 4]> = SmallVec::with_capacity(names.len());
        let mut seen = FxHashSet::default();

        for name in names {
            let name = name.as_ref();
            let item = self.item_by_name(name)?;

            if item.deal().is_some() || !seen.insert(item.id()) {
                return Err(CatalogError::ItemAlreadyInDeal(name.to_string()));
            }

            members.push(item.id());
        }

        // `sort_by_key` is stable, so equally priced members keep their listed order.
        members.sort_by_key(|id| {
            std::cmp::Reverse(
                self.items
                    .get(id.index())
                    .map_or(0, |item| item.price().to_minor_units()),
            )
        });

        let deal_id = DealId::new(self.deals.len());

        for id in &members {
            if let Some(item) = self.items.get_mut(id.index()) {
                item.set_deal(deal_id);
            }
        }

        debug!(deal_id = %deal_id, members = members.len(), "added catalog deal");

        self.deals.push(Deal::new(deal_id, members));

        Ok(deal_id)
    }

    /// Look up an item id by name.
    pub fn get_item_id(&self, name: &str) -> Option<ItemId> {
        self.item_ids.get(name).copied()
    }

    /// Get an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidItemId`] if no item has this id.
    pub fn get_item(&self, id: ItemId) -> Result<&CatalogItem, CatalogError> {
        self.items
            .get(id.index())
            .ok_or(CatalogError::InvalidItemId(id))
    }

    /// Get an item by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if no item has this name.
    pub fn item_by_name(&self, name: &str) -> Result<&CatalogItem, CatalogError> {
        self.get_item_id(name)
            .and_then(|id| self.items.get(id.index()))
            .ok_or_else(|| CatalogError::UnknownItem(name.to_string()))
    }

    /// Get a deal by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDealId`] if no deal has this id.
    pub fn get_deal(&self, id: DealId) -> Result<&Deal, CatalogError> {
        self.deals
            .get(id.index())
            .ok_or(CatalogError::InvalidDealId(id))
    }

    /// Iterate over the items in id order.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Iterate over the deals in id order.
    pub fn deals(&self) -> impl Iterator<Item = &Deal> {
        self.deals.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of deals.
    pub fn deal_count(&self) -> usize {
        self.deals.len()
    }
}

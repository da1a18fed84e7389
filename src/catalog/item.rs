//! Catalog Items

use crate::{
    catalog::{DealId, ItemId},
    pricing::Price,
};

/// An item available for purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    id: ItemId,
    name: String,
    price: Price,
    deal: Option<DealId>,
}

impl CatalogItem {
    pub(crate) fn new(id: ItemId, name: String, price: Price) -> Self {
        Self {
            id,
            name,
            price,
            deal: None,
        }
    }

    /// Item id
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Price {
        &self.price
    }

    /// The deal this item belongs to, if any.
    pub fn deal(&self) -> Option<DealId> {
        self.deal
    }

    pub(crate) fn set_deal(&mut self, deal: DealId) {
        self.deal = Some(deal);
    }
}

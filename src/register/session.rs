//! Checkout Session

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::{
    catalog::{Catalog, DealId, ItemId},
    deals::{DealGroup, resolve_deals},
};

/// Everything a register tracks for the customer currently checking out.
#[derive(Debug, Default, Clone)]
pub struct Session {
    /// Distinct items in the order they were first scanned.
    order: Vec<ItemId>,

    /// Requested quantity per item in the cart.
    quantities: FxHashMap<ItemId, u32>,

    /// Deals touched by anything scanned this session, in id order.
    potential_deals: BTreeSet<DealId>,

    /// Groups produced by the last deal resolution.
    deal_groups: Vec<DealGroup>,
}

impl Session {
    /// Add units of an item, appending it to the scan order if it is new.
    ///
    /// Returns the new quantity, or `None` with nothing changed if it would overflow.
    pub(crate) fn add(
        &mut self,
        item: ItemId,
        quantity: u32,
        deal: Option<DealId>,
    ) -> Option<u32> {
        let total = match self.quantities.get_mut(&item) {
            Some(existing) => {
                *existing = existing.checked_add(quantity)?;
                *existing
            }
            None => {
                self.order.push(item);
                self.quantities.insert(item, quantity);
                quantity
            }
        };

        if let Some(deal) = deal {
            self.potential_deals.insert(deal);
        }

        Some(total)
    }

    /// Drop every unit of an item. Returns the quantity removed, if the item was present.
    pub(crate) fn remove(&mut self, item: ItemId) -> Option<u32> {
        let quantity = self.quantities.remove(&item)?;

        self.order.retain(|id| *id != item);

        Some(quantity)
    }

    /// Group deal items for every deal touched this session.
    pub(crate) fn resolve_deals(&mut self, catalog: &Catalog) -> &[DealGroup] {
        let deals = catalog
            .deals()
            .filter(|deal| self.potential_deals.contains(&deal.id()));

        self.deal_groups = resolve_deals(deals, &mut self.quantities);

        &self.deal_groups
    }

    /// Reset to an empty cart.
    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.quantities.clear();
        self.potential_deals.clear();
        self.deal_groups.clear();
    }

    /// Current quantity of an item, if it is in the cart.
    pub fn quantity(&self, item: ItemId) -> Option<u32> {
        self.quantities.get(&item).copied()
    }

    /// Items with their current quantities, in scan order.
    pub fn lines(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.order
            .iter()
            .map(|id| (*id, self.quantities.get(id).copied().unwrap_or_default()))
    }

    /// Deals that might apply to the cart.
    pub fn potential_deals(&self) -> impl Iterator<Item = DealId> + '_ {
        self.potential_deals.iter().copied()
    }

    /// Groups from the last resolution.
    pub fn deal_groups(&self) -> &[DealGroup] {
        &self.deal_groups
    }

    /// Number of distinct items in the cart.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

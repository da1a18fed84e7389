//! Deals

use smallvec::SmallVec;

use crate::catalog::{DealId, ItemId};

/// Promotion shape, inferred from how many items a deal covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealKind {
    /// One member: every third unit of the item is free.
    BuyTwoGetOneFree,

    /// Several members: any three units across them, the cheapest is free.
    CheapestOfThreeFree,
}

impl DealKind {
    /// Short type code shown in the deal list.
    pub fn code(self) -> char {
        match self {
            DealKind::BuyTwoGetOneFree => 'A',
            DealKind::CheapestOfThreeFree => 'B',
        }
    }

    /// Customer-facing description of the promotion.
    pub fn description(self) -> &'static str {
        match self {
            DealKind::BuyTwoGetOneFree => "Buy 2 of this item and get a 3rd free!",
            DealKind::CheapestOfThreeFree => {
                "Buy any 3 of these items (duplicates allowed) and the cheapest is free!"
            }
        }
    }
}

/// A promotion over a fixed set of catalog items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    id: DealId,
    members: SmallVec<[ItemId; 4]>,
}

impl Deal {
    /// Members must be non-empty and sorted most expensive first.
    pub(crate) fn new(id: DealId, members: SmallVec<[ItemId; 4]>) -> Self {
        debug_assert!(!members.is_empty(), "deals are never empty");

        Self { id, members }
    }

    /// Deal id
    pub fn id(&self) -> DealId {
        self.id
    }

    /// Member item ids, most expensive first.
    pub fn members(&self) -> &[ItemId] {
        &self.members
    }

    /// The promotion shape of this deal.
    pub fn kind(&self) -> DealKind {
        if self.members.len() == 1 {
            DealKind::BuyTwoGetOneFree
        } else {
            DealKind::CheapestOfThreeFree
        }
    }
}

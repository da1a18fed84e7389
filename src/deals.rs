//! Deal Resolution
//!
//! Groups the units of deal items in a cart into completed three-unit deals.
//!
//! Each deal is walked in its stored member order (most expensive first) and
//! units are poured into a three-slot buffer; a full buffer becomes a
//! [`DealGroup`]. Because pricier members are drained before cheaper ones, the
//! last slot of every group holds the cheapest unit in it, which is the free
//! one. This is a single greedy pass, not a search over every possible
//! partition, and the grouping it produces is the one customers are billed for.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::catalog::{Deal, DealId, ItemId};

/// Number of units in a completed deal.
pub const GROUP_SIZE: usize = 3;

/// One completed deal: two paid units followed by the free unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealGroup {
    deal: DealId,
    slots: [ItemId; GROUP_SIZE],
}

impl DealGroup {
    /// Create a group from its slots, in fill order.
    pub fn new(deal: DealId, slots: [ItemId; GROUP_SIZE]) -> Self {
        Self { deal, slots }
    }

    /// The deal this group was formed under.
    pub fn deal(&self) -> DealId {
        self.deal
    }

    /// All three slots, in fill order.
    pub fn slots(&self) -> [ItemId; GROUP_SIZE] {
        self.slots
    }

    /// The two units that are paid for.
    pub fn paid(&self) -> [ItemId; 2] {
        let [first, second, _] = self.slots;

        [first, second]
    }

    /// The unit that is free.
    pub fn free(&self) -> ItemId {
        let [_, _, free] = self.slots;

        free
    }
}

/// Resolve the given deals against cart quantities.
///
/// Every unit of every member item ends up either in a returned group or back
/// in `quantities` at full price: member quantities are zeroed and the one or
/// two units left in the buffer after the last member are added back.
/// Items absent from `quantities` are skipped and never inserted.
pub fn resolve_deals<'d>(
    deals: impl IntoIterator<Item = &'d Deal>,
    quantities: &mut FxHashMap<ItemId, u32>,
) -> Vec<DealGroup> {
    let mut groups = Vec::new();

    for deal in deals {
        let mut buffer: SmallVec<[ItemId; GROUP_SIZE]> = SmallVec::new();

        for &item in deal.members() {
            let Some(&quantity) = quantities.get(&item) else {
                continue;
            };

            fill(deal.id(), item, quantity, &mut buffer, &mut groups);
        }

        for item in deal.members() {
            if let Some(quantity) = quantities.get_mut(item) {
                *quantity = 0;
            }
        }

        for item in buffer {
            *quantities.entry(item).or_insert(0) += 1;
        }
    }

    groups
}

/// Pour `quantity` units of `item` into the buffer, emitting a group each time it fills.
fn fill(
    deal: DealId,
    item: ItemId,
    quantity: u32,
    buffer: &mut SmallVec<[ItemId; GROUP_SIZE]>,
    groups: &mut Vec<DealGroup>,
) {
    let mut remaining = quantity;

    // Top up a partially filled buffer first; it may hold a pricier member.
    while remaining > 0 && !buffer.is_empty() {
        buffer.push(item);
        remaining -= 1;

        if let &[first, second, third] = buffer.as_slice() {
            groups.push(DealGroup::new(deal, [first, second, third]));
            buffer.clear();
        }
    }

    let whole_groups = remaining / 3;

    groups.extend((0..whole_groups).map(|_| DealGroup::new(deal, [item; GROUP_SIZE])));

    for _ in 0..remaining % 3 {
        buffer.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: usize) -> ItemId {
        ItemId::new(index)
    }

    fn deal(index: usize, members: &[usize]) -> Deal {
        Deal::new(
            DealId::new(index),
            members.iter().copied().map(ItemId::new).collect(),
        )
    }

    fn quantities(entries: &[(usize, u32)]) -> FxHashMap<ItemId, u32> {
        entries
            .iter()
            .map(|&(index, quantity)| (item(index), quantity))
            .collect()
    }

    #[test]
    fn buy_two_get_one_leaves_remainder_at_full_price() {
        let soda = deal(0, &[0]);
        let mut cart = quantities(&[(0, 5)]);

        let groups = resolve_deals([&soda], &mut cart);

        assert_eq!(groups, [DealGroup::new(DealId::new(0), [item(0); 3])]);
        assert_eq!(cart.get(&item(0)), Some(&2));
    }

    #[test]
    fn exact_multiples_leave_nothing_behind() {
        let soda = deal(0, &[0]);
        let mut cart = quantities(&[(0, 9)]);

        let groups = resolve_deals([&soda], &mut cart);

        assert_eq!(groups.len(), 3);
        assert_eq!(cart.get(&item(0)), Some(&0));
    }

    #[test]
    fn cheapest_of_three_puts_cheapest_last() {
        // Members stored price-descending: guac, chips, salsa.
        let dips = deal(0, &[2, 0, 1]);
        let mut cart = quantities(&[(0, 1), (1, 1), (2, 1)]);

        let groups = resolve_deals([&dips], &mut cart);

        assert_eq!(groups, [DealGroup::new(DealId::new(0), [item(2), item(0), item(1)])]);
        assert_eq!(groups.first().map(DealGroup::free), Some(item(1)));
        assert!(cart.values().all(|&quantity| quantity == 0));
    }

    #[test]
    fn groups_span_members() {
        let dips = deal(0, &[0, 1]);
        let mut cart = quantities(&[(0, 2), (1, 4)]);

        let groups = resolve_deals([&dips], &mut cart);

        assert_eq!(
            groups,
            [
                DealGroup::new(DealId::new(0), [item(0), item(0), item(1)]),
                DealGroup::new(DealId::new(0), [item(1), item(1), item(1)]),
            ]
        );
        assert_eq!(cart.get(&item(0)), Some(&0));
        assert_eq!(cart.get(&item(1)), Some(&0));
    }

    #[test]
    fn leftovers_are_returned_per_item() {
        let dips = deal(0, &[0, 1, 2]);
        let mut cart = quantities(&[(0, 1), (1, 3), (2, 1)]);

        let groups = resolve_deals([&dips], &mut cart);

        // [0, 1, 1] then buffer holds [1, 2].
        assert_eq!(groups, [DealGroup::new(DealId::new(0), [item(0), item(1), item(1)])]);
        assert_eq!(cart.get(&item(0)), Some(&0));
        assert_eq!(cart.get(&item(1)), Some(&1));
        assert_eq!(cart.get(&item(2)), Some(&1));
    }

    #[test]
    fn members_missing_from_cart_are_skipped() {
        let dips = deal(0, &[0, 1, 2]);
        let mut cart = quantities(&[(1, 2)]);

        let groups = resolve_deals([&dips], &mut cart);

        assert!(groups.is_empty());
        assert_eq!(cart.get(&item(1)), Some(&2));
        assert_eq!(cart.get(&item(0)), None);
        assert_eq!(cart.get(&item(2)), None);
    }

    #[test]
    fn buffer_does_not_carry_across_deals() {
        let first = deal(0, &[0]);
        let second = deal(1, &[1]);
        let mut cart = quantities(&[(0, 2), (1, 1)]);

        let groups = resolve_deals([&first, &second], &mut cart);

        assert!(groups.is_empty());
        assert_eq!(cart.get(&item(0)), Some(&2));
        assert_eq!(cart.get(&item(1)), Some(&1));
    }

    #[test]
    fn resolution_conserves_units() {
        let dips = deal(0, &[0, 1, 2, 3]);
        let original = quantities(&[(0, 7), (1, 0), (2, 5), (3, 4)]);
        let mut cart = original.clone();

        let groups = resolve_deals([&dips], &mut cart);

        for (id, &before) in &original {
            let grouped: u32 = groups
                .iter()
                .flat_map(|group| group.slots())
                .filter(|slot| slot == id)
                .map(|_| 1)
                .sum();

            let left = cart.get(id).copied().unwrap_or_default();

            assert_eq!(grouped + left, before, "units of item {id} not conserved");
        }

        assert_eq!(groups.len(), 16 / 3);
    }

    #[test]
    fn paid_and_free_split_slots() {
        let group = DealGroup::new(DealId::new(4), [item(1), item(2), item(3)]);

        assert_eq!(group.paid(), [item(1), item(2)]);
        assert_eq!(group.free(), item(3));
        assert_eq!(group.deal(), DealId::new(4));
    }
}

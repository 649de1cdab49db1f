//! Order targeting.
//!
//! Picks which order the search should work toward. Price only ranks orders
//! that are already brewable; otherwise the order cheapest to finish from
//! here is targeted.

use cauldron_types::{Ingredients, Order, Spell};

/// The best order that `inventory` can brew right now, if any.
///
/// Among several brewable orders the highest price wins; ties go to the
/// first listed.
pub fn fulfillable_order<'a>(inventory: &Ingredients, orders: &'a [Order]) -> Option<&'a Order> {
    orders
        .iter()
        .filter(|order| order.is_fulfilled_by(inventory))
        .fold(None, |best: Option<&Order>, order| match best {
            Some(current) if current.price >= order.price => Some(current),
            _ => Some(order),
        })
}

/// Deficit of `order` after the best single cast from `inventory`.
///
/// Only spells that are castable right now and legal from `inventory` are
/// simulated. With no such spell the current deficit is used.
pub fn lookahead_deficit(inventory: &Ingredients, order: &Order, spells: &[Spell]) -> i32 {
    spells
        .iter()
        .filter(|spell| spell.castable)
        .filter_map(|spell| spell.cast_result(inventory, 1))
        .map(|after| order.deficit_cost(&after))
        .min()
        .unwrap_or_else(|| order.deficit_cost(inventory))
}

/// Choose the order to pursue.
///
/// A brewable order is returned directly. Otherwise the order with the
/// smallest [`lookahead_deficit`] wins, first listed on ties. Returns `None`
/// only when there are no orders.
pub fn target_order<'a>(
    inventory: &Ingredients,
    orders: &'a [Order],
    spells: &[Spell],
) -> Option<&'a Order> {
    if let Some(order) = fulfillable_order(inventory, orders) {
        return Some(order);
    }
    orders
        .iter()
        .min_by_key(|order| lookahead_deficit(inventory, order, spells))
}

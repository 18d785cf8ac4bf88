use std::collections::BTreeMap;

use crate::domain::models::order::OrderItem;

/// A stock movement applied to one product inside an order transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockChange {
    /// Take units out of stock; fails when the product cannot cover them.
    Reserve { product_id: String, quantity: i32 },
    /// Put units back into stock.
    Release { product_id: String, quantity: i32 },
}

pub fn reserve_all(items: &[OrderItem]) -> Vec<StockChange> {
    rebalance(&[], items)
}

pub fn release_all(items: &[OrderItem]) -> Vec<StockChange> {
    rebalance(items, &[])
}

/// Net movement needed to go from `previous` to `next` line items.
/// Output is sorted by product id so concurrent writers lock rows in the same order.
pub fn rebalance(previous: &[OrderItem], next: &[OrderItem]) -> Vec<StockChange> {
    let mut net: BTreeMap<&str, i64> = BTreeMap::new();
    for item in previous {
        *net.entry(item.product_id.as_str()).or_default() -= i64::from(item.quantity);
    }
    for item in next {
        *net.entry(item.product_id.as_str()).or_default() += i64::from(item.quantity);
    }

    net.into_iter()
        .filter(|(_, delta)| *delta != 0)
        .map(|(product_id, delta)| {
            let quantity = i32::try_from(delta.abs()).unwrap_or(i32::MAX);
            if delta > 0 {
                StockChange::Reserve { product_id: product_id.to_string(), quantity }
            } else {
                StockChange::Release { product_id: product_id.to_string(), quantity }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i32) -> OrderItem {
        OrderItem { product_id: product_id.to_string(), quantity }
    }

    fn reserve(product_id: &str, quantity: i32) -> StockChange {
        StockChange::Reserve { product_id: product_id.to_string(), quantity }
    }

    fn release(product_id: &str, quantity: i32) -> StockChange {
        StockChange::Release { product_id: product_id.to_string(), quantity }
    }

    #[test]
    fn new_order_reserves_every_item() {
        let changes = reserve_all(&[item("b", 2), item("a", 3)]);
        assert_eq!(changes, vec![reserve("a", 3), reserve("b", 2)]);
    }

    #[test]
    fn deleted_order_releases_every_item() {
        let changes = release_all(&[item("a", 3)]);
        assert_eq!(changes, vec![release("a", 3)]);
    }

    #[test]
    fn rebalance_only_moves_the_difference() {
        let previous = [item("a", 3), item("b", 2), item("c", 1)];
        let next = [item("a", 5), item("b", 2), item("d", 4)];

        let changes = rebalance(&previous, &next);
        assert_eq!(
            changes,
            vec![reserve("a", 2), release("c", 1), reserve("d", 4)]
        );
    }

    #[test]
    fn identical_items_need_no_movement() {
        let items = [item("a", 3)];
        assert!(rebalance(&items, &items).is_empty());
    }
}

//! Price level implementation with FIFO queue
//!
//! A price level contains all orders at a specific price point.
//! Orders are kept in FIFO (First-In-First-Out) order to enforce time
//! priority. The orders themselves live in the owning side's slab arena;
//! a level only links them together as an intrusive doubly linked list,
//! so any order can be unlinked in O(1) given its handle.

use slab::Slab;
use types::numeric::Quantity;
use types::order::Order;

/// Stable handle of a resting order inside its side's arena
pub type OrderHandle = usize;

/// Arena node: the resting order plus its neighbours at the same price
#[derive(Debug, Clone)]
pub(crate) struct OrderNode {
    pub(crate) order: Order,
    prev: Option<OrderHandle>,
    next: Option<OrderHandle>,
}

/// Change applied to a level's cached aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LevelAction {
    /// An order joined the level with its remaining quantity
    Add,
    /// An order left the level with its remaining quantity
    Remove,
    /// A resting order was partially or fully filled
    Match,
}

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    head: Option<OrderHandle>,
    tail: Option<OrderHandle>,
    /// Total remaining quantity at this level, maintained incrementally
    total_quantity: Quantity,
    order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order at the back of the queue (time priority)
    pub(crate) fn push_back(&mut self, arena: &mut Slab<OrderNode>, order: Order) -> OrderHandle {
        let quantity = order.remaining_quantity();
        let handle = arena.insert(OrderNode {
            order,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => arena[tail].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);

        self.apply(LevelAction::Add, quantity);
        handle
    }

    /// Unlink an order from anywhere in the queue and take it out of the arena
    ///
    /// The handle must belong to this level.
    pub(crate) fn unlink(&mut self, arena: &mut Slab<OrderNode>, handle: OrderHandle) -> Order {
        let node = arena.remove(handle);

        match node.prev {
            Some(prev) => arena[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => arena[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        self.apply(LevelAction::Remove, node.order.remaining_quantity());
        node.order
    }

    /// Fill a resting order of this level
    ///
    /// Returns true if the order is now completely filled. The caller is
    /// expected to unlink filled orders.
    pub(crate) fn fill(
        &mut self,
        arena: &mut Slab<OrderNode>,
        handle: OrderHandle,
        quantity: Quantity,
    ) -> bool {
        let order = &mut arena[handle].order;
        order.fill(quantity);
        let filled = order.is_filled();

        self.apply(LevelAction::Match, quantity);
        filled
    }

    /// Update the cached aggregate
    fn apply(&mut self, action: LevelAction, quantity: Quantity) {
        match action {
            LevelAction::Add => {
                self.total_quantity = self.total_quantity.saturating_add(quantity);
                self.order_count += 1;
            }
            LevelAction::Remove => {
                self.total_quantity = self.total_quantity.saturating_sub(quantity);
                self.order_count = self.order_count.saturating_sub(1);
            }
            LevelAction::Match => {
                self.total_quantity = self.total_quantity.saturating_sub(quantity);
            }
        }
    }

    /// Handle of the order with time priority
    pub fn front(&self) -> Option<OrderHandle> {
        self.head
    }

    /// Iterate the level's orders in FIFO order
    pub(crate) fn iter<'a>(&self, arena: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            arena,
            cursor: self.head,
        }
    }

    /// Sum the remaining quantity of every order at this level
    ///
    /// Walks the queue instead of trusting the cached aggregate.
    pub(crate) fn remaining_quantity(&self, arena: &Slab<OrderNode>) -> Quantity {
        self.iter(arena).map(Order::remaining_quantity).sum()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Cached total quantity at this level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.order_count
    }
}

/// FIFO iterator over a level's orders
pub(crate) struct LevelIter<'a> {
    arena: &'a Slab<OrderNode>,
    cursor: Option<OrderHandle>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = &self.arena[handle];
        self.cursor = node.next;
        Some(&node.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::Price;
    use types::order::{OrderType, Side};

    fn order(id: u64, qty: u32) -> Order {
        Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(id),
            Side::Buy,
            Price::new(100),
            Quantity::new(qty),
        )
    }

    fn ids(level: &PriceLevel, arena: &Slab<OrderNode>) -> Vec<u64> {
        level.iter(arena).map(|o| o.order_id().value()).collect()
    }

    #[test]
    fn test_price_level_insert() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        level.push_back(&mut arena, order(1, 15));

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Quantity::new(15));
        assert!(!level.is_empty());
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        let first = level.push_back(&mut arena, order(1, 1));
        level.push_back(&mut arena, order(2, 2));
        level.push_back(&mut arena, order(3, 3));

        assert_eq!(level.front(), Some(first));
        assert_eq!(ids(&level, &arena), vec![1, 2, 3]);
    }

    #[test]
    fn test_price_level_unlink_middle() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        level.push_back(&mut arena, order(1, 1));
        let middle = level.push_back(&mut arena, order(2, 2));
        level.push_back(&mut arena, order(3, 3));

        let removed = level.unlink(&mut arena, middle);
        assert_eq!(removed.order_id(), OrderId::new(2));
        assert_eq!(ids(&level, &arena), vec![1, 3]);
        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity(), Quantity::new(4));
    }

    #[test]
    fn test_price_level_unlink_head_and_tail() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        let head = level.push_back(&mut arena, order(1, 1));
        let middle = level.push_back(&mut arena, order(2, 2));
        let tail = level.push_back(&mut arena, order(3, 3));

        level.unlink(&mut arena, head);
        assert_eq!(level.front(), Some(middle));

        level.unlink(&mut arena, tail);
        assert_eq!(ids(&level, &arena), vec![2]);

        // Appending after removing the tail links behind the survivor
        level.push_back(&mut arena, order(4, 4));
        assert_eq!(ids(&level, &arena), vec![2, 4]);

        level.unlink(&mut arena, middle);
        assert_eq!(ids(&level, &arena), vec![4]);
    }

    #[test]
    fn test_price_level_fill() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();
        let handle = level.push_back(&mut arena, order(1, 5));

        // Partial fill
        assert!(!level.fill(&mut arena, handle, Quantity::new(2)));
        assert_eq!(level.total_quantity(), Quantity::new(3));
        assert_eq!(level.order_count(), 1);

        // Complete fill, then unlink
        assert!(level.fill(&mut arena, handle, Quantity::new(3)));
        level.unlink(&mut arena, handle);
        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), Quantity::zero());
        assert_eq!(level.order_count(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_price_level_total_quantity_invariant() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        level.push_back(&mut arena, order(1, 15));
        let second = level.push_back(&mut arena, order(2, 25));
        level.push_back(&mut arena, order(3, 30));
        level.fill(&mut arena, second, Quantity::new(5));

        // Cached total should match the walked sum
        assert_eq!(level.total_quantity(), Quantity::new(65));
        assert_eq!(level.remaining_quantity(&arena), level.total_quantity());
    }

    #[test]
    fn test_price_level_aggregates_follow_queue_operations() {
        let mut arena = Slab::new();
        let mut level = PriceLevel::new();

        let first = level.push_back(&mut arena, order(1, 10));
        let second = level.push_back(&mut arena, order(2, 20));
        let third = level.push_back(&mut arena, order(3, 30));

        level.fill(&mut arena, first, Quantity::new(10));
        level.unlink(&mut arena, first);
        level.fill(&mut arena, third, Quantity::new(12));
        level.unlink(&mut arena, second);

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Quantity::new(18));
        assert_eq!(level.remaining_quantity(&arena), level.total_quantity());

        level.unlink(&mut arena, third);
        assert!(level.is_empty());
        assert_eq!(level.order_count(), 0);
        assert_eq!(level.total_quantity(), Quantity::zero());
    }
}

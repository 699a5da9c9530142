//! Cart aggregate: per-table receipts composed before payment
//!
//! One `TableCart` per table, created lazily on first add. Line identity
//! is the dish name; a line never persists at quantity 0. Totals are
//! always computed from the item list, never cached.

mod editor;

pub use editor::OrderEditor;

use crate::models::{LineItem, OrderType};
use crate::money;
use std::collections::BTreeMap;

/// One table's receipt in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCart {
    pub order_type: OrderType,
    pub items: Vec<LineItem>,
}

impl TableCart {
    /// Merge a dish into the cart: +1 on an existing line, else a new
    /// line at quantity 1
    pub fn add_item(&mut self, dish_name: &str, price: f64) {
        match self.items.iter_mut().find(|i| i.dish_name == dish_name) {
            Some(item) => item.quantity += 1,
            None => self.items.push(LineItem::new(dish_name, price, 1)),
        }
    }

    /// +1 on an existing line; missing lines are left alone
    pub fn increment(&mut self, dish_name: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.dish_name == dish_name) {
            item.quantity += 1;
        }
    }

    /// -1 on an existing line, removing it entirely at quantity 1
    pub fn decrement(&mut self, dish_name: &str) {
        if let Some(pos) = self.items.iter().position(|i| i.dish_name == dish_name) {
            if self.items[pos].quantity > 1 {
                self.items[pos].quantity -= 1;
            } else {
                self.items.remove(pos);
            }
        }
    }

    pub fn quantity_of(&self, dish_name: &str) -> i32 {
        self.items
            .iter()
            .find(|i| i.dish_name == dish_name)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Total units across all lines
    pub fn unit_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals, computed on read
    pub fn subtotal(&self) -> f64 {
        money::subtotal(&self.items)
    }
}

/// All in-progress receipts keyed by table number, plus the active
/// table selection used by the ordering screens
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    selected_table: Option<u32>,
    tables: BTreeMap<u32, TableCart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Selection ==========

    pub fn select_table(&mut self, table: u32) {
        self.selected_table = Some(table);
    }

    pub fn clear_selection(&mut self) {
        self.selected_table = None;
    }

    pub fn selected_table(&self) -> Option<u32> {
        self.selected_table
    }

    /// The selected table's cart, when both exist
    pub fn selected_cart(&self) -> Option<(u32, &TableCart)> {
        let table = self.selected_table?;
        self.tables.get(&table).map(|cart| (table, cart))
    }

    // ========== Mutations ==========

    /// Merge a dish into a table's cart, creating the cart on first use
    pub fn add_item(&mut self, table: u32, dish_name: &str, price: f64) {
        self.tables
            .entry(table)
            .or_default()
            .add_item(dish_name, price);
    }

    /// +1 on an existing line; missing cart or line is a silent no-op
    pub fn increment(&mut self, table: u32, dish_name: &str) {
        if let Some(cart) = self.tables.get_mut(&table) {
            cart.increment(dish_name);
        }
    }

    /// -1 on an existing line, removing it at quantity 1; missing cart
    /// or line is a silent no-op
    pub fn decrement(&mut self, table: u32, dish_name: &str) {
        if let Some(cart) = self.tables.get_mut(&table) {
            cart.decrement(dish_name);
        }
    }

    /// Tag a table's cart, creating the cart when absent
    pub fn set_order_type(&mut self, table: u32, order_type: OrderType) {
        self.tables.entry(table).or_default().order_type = order_type;
    }

    /// Drop a table's cart (after payment); a matching selection resets
    pub fn remove_table(&mut self, table: u32) {
        self.tables.remove(&table);
        if self.selected_table == Some(table) {
            self.selected_table = None;
        }
    }

    // ========== Reads ==========

    pub fn cart(&self, table: u32) -> Option<&TableCart> {
        self.tables.get(&table)
    }

    pub fn quantity_of(&self, table: u32, dish_name: &str) -> i32 {
        self.tables
            .get(&table)
            .map(|c| c.quantity_of(dish_name))
            .unwrap_or(0)
    }

    /// Units on a table, 0 when it has no cart (table grid badge)
    pub fn unit_count(&self, table: u32) -> i32 {
        self.tables
            .get(&table)
            .map(|c| c.unit_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_dish_twice_merges_into_one_line() {
        let mut store = CartStore::new();
        store.add_item(1, "Fries", 3000.0);
        store.add_item(1, "Fries", 3000.0);

        let cart = store.cart(1).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.order_type, OrderType::DineIn);
    }

    #[test]
    fn test_quantity_never_persists_at_zero() {
        let mut store = CartStore::new();
        store.add_item(1, "Fries", 3000.0);
        store.add_item(1, "Fries", 3000.0);

        store.decrement(1, "Fries");
        assert_eq!(store.quantity_of(1, "Fries"), 1);

        store.decrement(1, "Fries");
        assert!(store.cart(1).unwrap().is_empty());
        assert_eq!(store.quantity_of(1, "Fries"), 0);

        // every remaining line always has quantity >= 1
        store.add_item(1, "Cola", 1500.0);
        store.increment(1, "Cola");
        store.decrement(1, "Cola");
        assert!(store.cart(1).unwrap().items.iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_increment_and_decrement_on_missing_are_noops() {
        let mut store = CartStore::new();
        store.increment(7, "Ghost");
        store.decrement(7, "Ghost");
        assert!(store.cart(7).is_none());

        store.add_item(7, "Fries", 3000.0);
        store.increment(7, "Ghost");
        store.decrement(7, "Ghost");
        assert_eq!(store.quantity_of(7, "Fries"), 1);
    }

    #[test]
    fn test_missing_table_reads_as_empty_dine_in() {
        let store = CartStore::new();
        assert!(store.cart(3).is_none());
        assert_eq!(store.unit_count(3), 0);
        assert_eq!(store.quantity_of(3, "Fries"), 0);
        // lazily created carts default to Dine In
        assert_eq!(TableCart::default().order_type, OrderType::DineIn);
    }

    #[test]
    fn test_set_order_type_initializes_missing_cart() {
        let mut store = CartStore::new();
        store.set_order_type(4, OrderType::TakeAway);

        let cart = store.cart(4).unwrap();
        assert_eq!(cart.order_type, OrderType::TakeAway);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_selection_is_independent_of_cart_contents() {
        let mut store = CartStore::new();
        store.select_table(2);
        assert_eq!(store.selected_table(), Some(2));
        // no cart yet
        assert!(store.selected_cart().is_none());

        store.add_item(2, "Burger", 4000.0);
        let (table, cart) = store.selected_cart().unwrap();
        assert_eq!(table, 2);
        assert_eq!(cart.unit_count(), 1);
    }

    #[test]
    fn test_remove_table_drops_cart_and_matching_selection() {
        let mut store = CartStore::new();
        store.add_item(5, "Burger", 4000.0);
        store.select_table(5);

        store.remove_table(5);
        assert!(store.cart(5).is_none());
        assert_eq!(store.selected_table(), None);

        // removing another table leaves the selection alone
        store.add_item(6, "Cola", 1500.0);
        store.select_table(6);
        store.remove_table(5);
        assert_eq!(store.selected_table(), Some(6));
    }

    #[test]
    fn test_subtotal_computed_from_lines() {
        let mut store = CartStore::new();
        store.add_item(1, "Fries", 3000.0);
        store.add_item(1, "Fries", 3000.0);
        store.add_item(1, "Burger", 4000.0);

        assert_eq!(store.cart(1).unwrap().subtotal(), 10000.0);
        assert_eq!(store.cart(1).unwrap().unit_count(), 3);
    }
}

//! Working copy of a submitted order being edited before re-save

use crate::models::{LineItem, Order, OrderUpdate};
use crate::money;

/// Editable order state: a fetched order plus a dirty flag tracking
/// unsaved item changes
///
/// Totals are derived from the item list on read; the wire totals on
/// the stored order are refreshed only when building the save payload.
#[derive(Debug, Clone, Default)]
pub struct OrderEditor {
    current: Option<Order>,
    dirty: bool,
}

impl OrderEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working copy with a fetch result; resets the dirty flag
    pub fn set_current(&mut self, order: Order) {
        self.current = Some(order);
        self.dirty = false;
    }

    /// Drop the working copy when leaving the detail screen
    pub fn clear(&mut self) {
        self.current = None;
        self.dirty = false;
    }

    pub fn order(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset after a successful save
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// +1 on the named line; a missing order or line is a no-op and
    /// leaves the dirty flag untouched
    pub fn increment_item(&mut self, dish_name: &str) {
        let Some(order) = self.current.as_mut() else {
            return;
        };
        if let Some(item) = order.items.iter_mut().find(|i| i.dish_name == dish_name) {
            item.quantity += 1;
            self.dirty = true;
        }
    }

    /// -1 on the named line, removing it entirely at quantity 1
    pub fn decrement_item(&mut self, dish_name: &str) {
        let Some(order) = self.current.as_mut() else {
            return;
        };
        if let Some(pos) = order.items.iter().position(|i| i.dish_name == dish_name) {
            if order.items[pos].quantity > 1 {
                order.items[pos].quantity -= 1;
            } else {
                order.items.remove(pos);
            }
            self.dirty = true;
        }
    }

    /// Merge a signed quantity delta into the named line
    ///
    /// An existing line absorbs the delta and is removed when the merged
    /// quantity drops to 0 or below. A missing line is inserted only for
    /// a positive delta.
    pub fn add_item(&mut self, dish_name: &str, price: f64, delta: i32) {
        let Some(order) = self.current.as_mut() else {
            return;
        };
        if let Some(pos) = order.items.iter().position(|i| i.dish_name == dish_name) {
            let merged = order.items[pos].quantity + delta;
            if merged <= 0 {
                order.items.remove(pos);
            } else {
                order.items[pos].quantity = merged;
            }
            self.dirty = true;
        } else if delta > 0 {
            order.items.push(LineItem::new(dish_name, price, delta));
            self.dirty = true;
        }
    }

    pub fn quantity_of(&self, dish_name: &str) -> i32 {
        self.current
            .as_ref()
            .and_then(|o| o.items.iter().find(|i| i.dish_name == dish_name))
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Sum of line totals, computed on read
    pub fn subtotal(&self) -> f64 {
        self.current
            .as_ref()
            .map(|o| money::subtotal(&o.items))
            .unwrap_or(0.0)
    }

    /// Subtotal plus tax at the order's stored rate, computed on read
    pub fn final_total(&self) -> f64 {
        self.current
            .as_ref()
            .map(|o| money::final_total(money::subtotal(&o.items), o.tax_rate))
            .unwrap_or(0.0)
    }

    /// Build the save payload, refreshing totals from the item list
    pub fn update_payload(&self) -> Option<OrderUpdate> {
        let order = self.current.as_ref()?;
        let subtotal = money::subtotal(&order.items);
        Some(OrderUpdate {
            items: order.items.clone(),
            tax_rate: order.tax_rate,
            subtotal,
            final_total: money::final_total(subtotal, order.tax_rate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_order() -> Order {
        Order {
            id: "ord-1".to_string(),
            table: "3".to_string(),
            order_type: Default::default(),
            items: vec![
                LineItem::new("Fries", 3000.0, 2),
                LineItem::new("Burger", 4000.0, 1),
            ],
            tax_rate: 0.05,
            subtotal: 10000.0,
            final_total: 10500.0,
            payment_type: Default::default(),
            paid_amount: 0.0,
            change: 0.0,
            created_at: None,
        }
    }

    #[test]
    fn test_set_current_clears_dirty() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());
        editor.increment_item("Fries");
        assert!(editor.is_dirty());

        editor.set_current(create_test_order());
        assert!(!editor.is_dirty());
        assert_eq!(editor.quantity_of("Fries"), 2);
    }

    #[test]
    fn test_increment_marks_dirty_only_when_applied() {
        let mut editor = OrderEditor::new();

        // no order loaded
        editor.increment_item("Fries");
        assert!(!editor.is_dirty());

        editor.set_current(create_test_order());
        // dish not on the order
        editor.increment_item("Ghost");
        assert!(!editor.is_dirty());

        editor.increment_item("Fries");
        assert!(editor.is_dirty());
        assert_eq!(editor.quantity_of("Fries"), 3);
    }

    #[test]
    fn test_decrement_removes_line_at_quantity_one() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());

        editor.decrement_item("Burger");
        assert_eq!(editor.quantity_of("Burger"), 0);
        assert_eq!(editor.order().unwrap().items.len(), 1);
        assert!(editor.is_dirty());

        // decrementing a removed line is a no-op
        editor.clear_dirty();
        editor.decrement_item("Burger");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_add_item_merges_signed_delta() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());

        editor.add_item("Fries", 3000.0, 1);
        assert_eq!(editor.quantity_of("Fries"), 3);

        editor.add_item("Fries", 3000.0, -1);
        assert_eq!(editor.quantity_of("Fries"), 2);

        // new dish inserted at the delta
        editor.add_item("Cola", 1500.0, 1);
        assert_eq!(editor.quantity_of("Cola"), 1);
    }

    #[test]
    fn test_add_item_removes_line_at_zero_or_below() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());

        editor.add_item("Burger", 4000.0, -1);
        assert_eq!(editor.quantity_of("Burger"), 0);
        assert_eq!(editor.order().unwrap().items.len(), 1);

        editor.add_item("Fries", 3000.0, -5);
        assert!(editor.order().unwrap().items.is_empty());
    }

    #[test]
    fn test_negative_delta_on_missing_line_inserts_nothing() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());

        editor.clear_dirty();
        editor.add_item("Ghost", 9999.0, -1);
        assert_eq!(editor.quantity_of("Ghost"), 0);
        assert_eq!(editor.order().unwrap().items.len(), 2);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_increment_then_decrement_restores_totals() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());
        let before = editor.final_total();

        editor.increment_item("Fries");
        editor.decrement_item("Fries");
        assert_eq!(editor.final_total(), before);
    }

    #[test]
    fn test_totals_computed_from_items_not_stored_fields() {
        let mut order = create_test_order();
        // stale wire totals must not leak into reads
        order.subtotal = 1.0;
        order.final_total = 2.0;

        let mut editor = OrderEditor::new();
        editor.set_current(order);

        assert_eq!(editor.subtotal(), 10000.0);
        assert_eq!(editor.final_total(), 10500.0);
    }

    #[test]
    fn test_update_payload_refreshes_totals() {
        let mut editor = OrderEditor::new();
        editor.set_current(create_test_order());
        editor.increment_item("Burger");

        let payload = editor.update_payload().unwrap();
        assert_eq!(payload.subtotal, 14000.0);
        assert_eq!(payload.final_total, 14700.0);
        assert_eq!(payload.tax_rate, 0.05);
        assert_eq!(payload.items.len(), 2);

        editor.clear();
        assert!(editor.update_payload().is_none());
        assert!(!editor.is_dirty());
    }
}

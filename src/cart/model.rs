use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::repo::LabTest;

/// One catalog test in a cart. Name, price and parameter count are snapshot
/// copies taken when the line was added; catalog edits do not re-sync them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub test_id: Uuid,
    pub test_name: String,
    pub parameter_count: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Per-user cart aggregate. Totals are derived, never settable from outside:
/// every mutation goes through [`Cart::recompute_totals`] before a save.
/// At most one line exists per test id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: Uuid,
    pub lines: Vec<CartLine>,
    pub sub_total: f64,
    pub total: f64,
    pub net_payable: f64,
    pub created_at: OffsetDateTime,
}

impl Cart {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
            sub_total: 0.0,
            total: 0.0,
            net_payable: 0.0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn line(&self, test_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.test_id == test_id)
    }

    /// Merge-by-test-id or append a new snapshot line.
    pub fn add_line(&mut self, test: &LabTest, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.test_id == test.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                test_id: test.id,
                test_name: test.name.clone(),
                parameter_count: test.parameter_count,
                quantity,
                unit_price: test.price,
            });
        }
    }

    /// Decrement when `quantity` is given and below the line's count,
    /// otherwise drop the line. Returns false when no such line exists.
    pub fn remove_line(&mut self, test_id: Uuid, quantity: Option<i32>) -> bool {
        let Some(idx) = self.lines.iter().position(|l| l.test_id == test_id) else {
            return false;
        };
        match quantity {
            Some(q) if q < self.lines[idx].quantity => self.lines[idx].quantity -= q,
            _ => {
                self.lines.remove(idx);
            }
        }
        true
    }

    /// Drop lines whose test id is not in `alive`; returns how many went.
    pub fn retain_lines(&mut self, alive: &HashSet<Uuid>) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| alive.contains(&l.test_id));
        before - self.lines.len()
    }

    /// subtotal = sum over lines; total and net payable are identity for now
    /// (discount and coupon extension points).
    pub fn recompute_totals(&mut self) {
        self.sub_total = self
            .lines
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum();
        self.total = self.sub_total;
        self.net_payable = self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(price: f64) -> LabTest {
        LabTest {
            id: Uuid::new_v4(),
            name: "Lipid Profile".into(),
            code: Some("LIP01".into()),
            price,
            parameter_count: 8,
            special_instruction: "Fast for 12 hours".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn add_line_merges_on_same_test() {
        let test = test_item(450.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&test, 2);
        cart.add_line(&test, 3);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn add_line_snapshots_catalog_fields() {
        let test = test_item(450.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&test, 1);
        let line = cart.line(test.id).expect("line");
        assert_eq!(line.test_name, "Lipid Profile");
        assert_eq!(line.parameter_count, 8);
        assert_eq!(line.unit_price, 450.0);
    }

    #[test]
    fn remove_line_decrements_then_removes() {
        let test = test_item(100.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&test, 5);

        assert!(cart.remove_line(test.id, Some(2)));
        assert_eq!(cart.line(test.id).unwrap().quantity, 3);

        // removing the full remaining quantity drops the line
        assert!(cart.remove_line(test.id, Some(3)));
        assert!(cart.lines.is_empty());
    }

    #[test]
    fn remove_line_without_quantity_drops_line() {
        let test = test_item(100.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&test, 4);
        assert!(cart.remove_line(test.id, None));
        assert!(cart.lines.is_empty());
    }

    #[test]
    fn remove_line_missing_returns_false() {
        let mut cart = Cart::new(Uuid::new_v4());
        assert!(!cart.remove_line(Uuid::new_v4(), None));
    }

    #[test]
    fn recompute_totals_sums_surviving_lines() {
        let a = test_item(450.0);
        let b = test_item(250.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&a, 2);
        cart.add_line(&b, 1);
        cart.recompute_totals();
        assert_eq!(cart.sub_total, 1150.0);
        assert_eq!(cart.total, 1150.0);
        assert_eq!(cart.net_payable, 1150.0);
    }

    #[test]
    fn recompute_totals_is_idempotent() {
        let test = test_item(300.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&test, 3);
        cart.recompute_totals();
        let first = (cart.sub_total, cart.total, cart.net_payable);
        cart.recompute_totals();
        assert_eq!(first, (cart.sub_total, cart.total, cart.net_payable));
    }

    #[test]
    fn retain_lines_drops_dangling_refs() {
        let a = test_item(100.0);
        let b = test_item(200.0);
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(&a, 1);
        cart.add_line(&b, 1);

        let alive: HashSet<Uuid> = [a.id].into_iter().collect();
        assert_eq!(cart.retain_lines(&alive), 1);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].test_id, a.id);
    }
}

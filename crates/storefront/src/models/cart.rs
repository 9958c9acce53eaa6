//! Session cart.
//!
//! The cart is a list of product IDs and quantities stored in the session.
//! Prices are never stored; they are read from the catalog every time the
//! cart is rendered.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use bookstall_core::ProductId;

/// Highest quantity a single line may hold.
pub const MAX_QUANTITY: u32 = 99;

/// One product in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A shopper's cart, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// Quantities saturate at [`MAX_QUANTITY`]; adding zero is a no-op.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity).min(MAX_QUANTITY);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity: quantity.min(MAX_QUANTITY),
            });
        }
    }

    /// Remove a product. Returns whether it was in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Drop lines whose product is not in `available`. Returns whether anything was dropped.
    pub fn retain_available(&mut self, available: &HashSet<ProductId>) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| available.contains(&l.product_id));
        self.lines.len() != before
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|l| l.product_id).collect()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        cart.add(id(1), 2);
        cart.add(id(2), 1);
        cart.add(id(1), 3);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.product_ids(), vec![id(1), id(2)]);
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = Cart::default();
        cart.add(id(1), 150);
        assert_eq!(cart.item_count(), MAX_QUANTITY);
        cart.add(id(1), u32::MAX);
        assert_eq!(cart.item_count(), MAX_QUANTITY);
    }

    #[test]
    fn test_add_zero_is_ignored() {
        let mut cart = Cart::default();
        cart.add(id(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::default();
        cart.add(id(1), 1);
        assert!(cart.remove(id(1)));
        assert!(!cart.remove(id(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_retain_available() {
        let mut cart = Cart::default();
        cart.add(id(1), 1);
        cart.add(id(2), 1);

        let available: HashSet<_> = [id(2)].into_iter().collect();
        assert!(cart.retain_available(&available));
        assert_eq!(cart.product_ids(), vec![id(2)]);
        assert!(!cart.retain_available(&available));
    }
}

//! Cart aggregate.
//!
//! A line item is keyed by (product id, selected color); an absent color
//! matches only an absent color. Every operation is total: missing lines are
//! no-ops and quantities clamp at 1, so mutations can never half-apply.

use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// One cart entry: a product snapshot taken at add time, plus quantity and
/// the chosen color variant. The snapshot is deliberately not refreshed on
/// repeat adds, so the cart reflects the price at the moment of first add.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartLine {
    fn matches(&self, product_id: &str, selected_color: Option<&str>) -> bool {
        self.product.id == product_id && self.selected_color.as_deref() == selected_color
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn find(&self, product_id: &str, selected_color: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(product_id, selected_color))
    }

    /// Merges by (id, color): an existing line gains quantity 1, otherwise a
    /// new line is appended with quantity 1. Never duplicates a key.
    pub fn add(&mut self, product: &Product, selected_color: Option<&str>) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&product.id, selected_color))
        {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
            selected_color: selected_color.map(str::to_string),
        });
    }

    /// Removes the exact (id, color) line. Absent key is a no-op.
    pub fn remove(&mut self, product_id: &str, selected_color: Option<&str>) {
        self.lines.retain(|l| !l.matches(product_id, selected_color));
    }

    /// Adjusts quantity by `delta`, clamped at 1. Removal is only ever
    /// explicit via [`Cart::remove`]. Absent key is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64, selected_color: Option<&str>) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(product_id, selected_color))
        {
            line.quantity = i64::from(line.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX)) as u32;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

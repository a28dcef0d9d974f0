use crate::{
    dto::orders::CreateOrderRequest,
    models::{MenuItem, OrderItem, round_cents},
};

/// One menu item in the cart, in the order it was first added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub notes: Option<String>,
}

/// A diner's pending selection, keyed by menu item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one of `item`, or bump the quantity if it is already in the cart.
    pub fn add(&mut self, item: &MenuItem) {
        match self.line_mut(&item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                menu_item_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                quantity: 1,
                notes: None,
            }),
        }
    }

    pub fn remove(&mut self, menu_item_id: &str) {
        self.lines.retain(|line| line.menu_item_id != menu_item_id);
    }

    /// Zero removes the line.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(menu_item_id);
        } else if let Some(line) = self.line_mut(menu_item_id) {
            line.quantity = quantity;
        }
    }

    pub fn set_note(&mut self, menu_item_id: &str, note: Option<String>) {
        if let Some(line) = self.line_mut(menu_item_id) {
            line.notes = note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
        }
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        round_cents(
            self.lines
                .iter()
                .map(|line| line.price * f64::from(line.quantity))
                .sum(),
        )
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn to_request(&self, table_number: u32, customer_notes: Option<String>) -> CreateOrderRequest {
        let items = self
            .lines
            .iter()
            .map(|line| OrderItem {
                id: Some(line.menu_item_id.clone()),
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                notes: line.notes.clone(),
            })
            .collect();
        CreateOrderRequest {
            table_number,
            items,
            total: Some(self.total()),
            customer_notes: customer_notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }

    fn line_mut(&mut self, menu_item_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, SizeVariant};

/// Shopping cart for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub session_id: String,
    pub items: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a cart: a product snapshot in a given size with a quantity.
/// The snapshot is taken when the line is created; catalog edits after that
/// point do not reach existing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub size: SizeVariant,
    pub added_at: DateTime<Utc>,
}

/// Request model for adding an item to the cart. Quantity is signed so that
/// non-positive values reach the range guard instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub size: SizeVariant,
}

/// Request model for updating a line quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Request model for updating a line size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSizeRequest {
    pub size: SizeVariant,
}

/// Response model for cart operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub session_id: String,
    pub items: Vec<CartLineResponse>,
    pub item_count: u64,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart line with its extended line total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub product: Product,
    pub quantity: u32,
    pub size: SizeVariant,
    pub line_total: Decimal,
    pub added_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new empty cart for a session
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart. Lines are keyed by (product id, size):
    /// an existing line for the pair has its quantity incremented in place,
    /// otherwise a new line is appended. The pair is never duplicated here.
    pub fn add_line(&mut self, product: Product, quantity: u32, size: SizeVariant) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.id == product.id && line.size == size)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine {
                product,
                quantity,
                size,
                added_at: Utc::now(),
            });
        }
        self.updated_at = Utc::now();
    }

    /// Remove every line for the given product id, across all size
    /// variants. A product held in two sizes disappears entirely from one
    /// call; size-qualified removal is deliberately not offered.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let original_len = self.items.len();
        self.items.retain(|line| line.product.id != product_id);
        let removed = self.items.len() != original_len;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Set the quantity on every line matching the product id. Matching is
    /// by product id only: all size variants of the product receive the
    /// same new quantity. Returns false when no line matched.
    pub fn set_product_quantity(&mut self, product_id: &str, new_quantity: u32) -> bool {
        let mut matched = false;
        for line in self
            .items
            .iter_mut()
            .filter(|line| line.product.id == product_id)
        {
            line.quantity = new_quantity;
            matched = true;
        }
        if matched {
            self.updated_at = Utc::now();
        }
        matched
    }

    /// Set the size on every line matching the product id. If this leaves
    /// two lines sharing one (product id, size) pair they stay distinct;
    /// pair uniqueness is an `add_line` guarantee only and no merge happens
    /// here. Returns false when no line matched.
    pub fn set_product_size(&mut self, product_id: &str, new_size: SizeVariant) -> bool {
        let mut matched = false;
        for line in self
            .items
            .iter_mut()
            .filter(|line| line.product.id == product_id)
        {
            line.size = new_size.clone();
            matched = true;
        }
        if matched {
            self.updated_at = Utc::now();
        }
        matched
    }

    /// Clear all lines from the cart. Returns false when it was already
    /// empty.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.updated_at = Utc::now();
        true
    }

    /// Total number of units in the cart, recomputed on every call
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Total price of the cart, recomputed on every call from the line
    /// snapshots
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|line| line.line_total()).sum()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for an exact (product id, size) pair
    pub fn line(&self, product_id: &str, size: &SizeVariant) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|line| line.product.id == product_id && &line.size == size)
    }

    /// Check if any line holds the given product, in any size
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.items.iter().any(|line| line.product.id == product_id)
    }

    /// Quantity held for an exact (product id, size) pair
    pub fn quantity_of(&self, product_id: &str, size: &SizeVariant) -> u32 {
        self.line(product_id, size)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }
}

impl CartLine {
    /// Extended price for this line (unit price * quantity)
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            session_id: cart.session_id.clone(),
            items: cart
                .items
                .iter()
                .map(|line| CartLineResponse {
                    product: line.product.clone(),
                    quantity: line.quantity,
                    size: line.size.clone(),
                    line_total: line.line_total(),
                    added_at: line.added_at,
                })
                .collect(),
            item_count: cart.item_count(),
            total_price: cart.total_price(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

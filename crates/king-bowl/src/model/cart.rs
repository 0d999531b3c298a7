//! A customer's shopping cart.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](kcb_framework::ResourceActor); every change goes
//! through a [`CartAction`](crate::cart_actor::CartAction) and the whole set of carts
//! is persisted under the `kcb_cart` key.

use crate::model::{MenuItemId, SpiceLevel};
use crate::pricing::{Bill, Pricing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Carts. One cart per browser tab / session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// One dish in the cart. Name and unit price are copied from the menu when the
/// dish is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub spice_level: SpiceLevel,
    pub instructions: String,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    /// Browser tab or device the cart belongs to, if known.
    pub session: Option<String>,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for opening a new cart.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub session: Option<String>,
}

/// What the cart badge and the order summary panel show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities.
    pub item_count: u32,
    pub line_count: usize,
    pub bill: Bill,
}

impl Cart {
    pub fn new(id: CartId, session: Option<String>) -> Self {
        Self {
            id,
            session,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn line(&self, menu_item_id: MenuItemId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.menu_item_id == menu_item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self, pricing: &Pricing) -> CartSummary {
        CartSummary {
            item_count: self.items.iter().map(|item| item.quantity).sum(),
            line_count: self.items.len(),
            bill: pricing.bill(
                self.items
                    .iter()
                    .map(|item| (item.unit_price, item.quantity)),
            ),
        }
    }
}

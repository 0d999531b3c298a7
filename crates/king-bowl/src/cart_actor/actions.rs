//! Cart reducer actions.
//!
//! Every action is handled by [`Cart::apply`](crate::model::Cart::apply) and answers
//! with the updated [`CartSummary`](crate::model::CartSummary).

use crate::model::{MenuItemId, SpiceLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds a dish. If it is already in the cart its quantity is increased and the
    /// existing spice level and instructions are kept.
    AddItem {
        menu_item_id: MenuItemId,
        quantity: u32,
        /// Defaults to the dish's own level.
        spice_level: Option<SpiceLevel>,
        instructions: String,
    },
    /// Setting 0 removes the line.
    SetQuantity {
        menu_item_id: MenuItemId,
        quantity: u32,
    },
    SetInstructions {
        menu_item_id: MenuItemId,
        instructions: String,
    },
    SetSpiceLevel {
        menu_item_id: MenuItemId,
        spice_level: SpiceLevel,
    },
    RemoveItem {
        menu_item_id: MenuItemId,
    },
    Clear,
    /// Takes paid-for portions out of the cart. Each line loses at most the
    /// billed quantity; anything added after billing stays.
    Settle { lines: Vec<(MenuItemId, u32)> },
}

impl CartAction {
    /// Default spice, no instructions.
    pub fn add(menu_item_id: MenuItemId, quantity: u32) -> Self {
        CartAction::AddItem {
            menu_item_id,
            quantity,
            spice_level: None,
            instructions: String::new(),
        }
    }
}

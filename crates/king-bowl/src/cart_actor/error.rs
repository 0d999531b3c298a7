//! Error types for the Cart actor.

use crate::model::MenuItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The dish is not on the menu.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// The dish is on the menu but not in this cart.
    #[error("{0} is not in the cart")]
    NotInCart(MenuItemId),

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Quantity {requested} exceeds the limit of {max} per dish")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

//! Error types for the Order actor.

use crate::model::{ItemStatus, MenuItemId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("An order needs at least one item")]
    EmptyOrder,

    #[error("Dine-in orders need a table number")]
    MissingTable,

    #[error("Table {table} does not exist (tables 1-{max})")]
    InvalidTable { table: u8, max: u8 },

    #[error("Orders must record who created them")]
    MissingCreator,

    #[error("Quantity for {0} must be at least 1")]
    InvalidQuantity(MenuItemId),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is already {0}")]
    NoNextStatus(OrderStatus),

    #[error("Order has no item at position {0}")]
    NoSuchItem(usize),

    #[error("Cannot move item from {from} back to {to}")]
    InvalidItemTransition { from: ItemStatus, to: ItemStatus },

    #[error("Order is {0} and can no longer change")]
    OrderClosed(OrderStatus),

    /// The ledger only grows; orders are cancelled, never removed.
    #[error("Orders cannot be deleted")]
    DeleteNotAllowed,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

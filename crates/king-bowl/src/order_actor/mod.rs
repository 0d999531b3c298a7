//! # Order Actor
//!
//! The staff order ledger. The POS creates orders, the kitchen advances them and the
//! dashboard cancels them; all three go through this one actor, so their changes are
//! applied strictly one after another.
//!
//! ## Structure
//!
//! - [`entity`] - status state machine and [`ActorEntity`](kcb_framework::ActorEntity) implementation
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`]
//!
//! ## Persistence
//!
//! The ledger is one JSON array under [`ORDERS_KEY`]; the next order number lives
//! under [`ORDER_COUNTER_KEY`] so numbering continues across restarts. Orders are
//! never deleted.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog::Catalog;
use crate::model::StaffOrder;
use crate::pricing::Pricing;
use kcb_framework::{JsonPersistence, KeyValueStore, ResourceActor, ResourceClient};
use std::sync::Arc;

/// Store key holding the ledger.
pub const ORDERS_KEY: &str = "kcb_staff_orders";
/// Store key holding the next order number.
pub const ORDER_COUNTER_KEY: &str = "kcb_order_counter";

/// Menu, GST rate and dining-room size, used to price and check new orders.
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: Arc<Catalog>,
    pub pricing: Pricing,
    pub table_count: u8,
}

/// Creates a new Order actor and its client. Numbering starts at `first_number`
/// unless a stored counter says otherwise.
pub fn new(
    mailbox_size: usize,
    first_number: u32,
) -> (ResourceActor<StaffOrder>, ResourceClient<StaffOrder>) {
    let (actor, client) = ResourceActor::new(mailbox_size);
    (actor.starting_at(first_number), client)
}

pub fn persistence(store: Arc<dyn KeyValueStore>) -> JsonPersistence<StaffOrder> {
    JsonPersistence::new(store, ORDERS_KEY).with_counter(ORDER_COUNTER_KEY)
}

//! # Cart Actor
//!
//! Owns every open shopping cart. Changes go through the [`CartAction`] reducer and
//! each answers with the cart's updated [`CartSummary`](crate::model::CartSummary).
//!
//! ## Structure
//!
//! - [`entity`] - the reducer and the [`ActorEntity`](kcb_framework::ActorEntity) implementation
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`]
//!
//! ## Persistence
//!
//! All carts are stored as one JSON array under [`CART_KEY`], rewritten after every
//! change. An unreadable value is logged and the actor starts with no carts.
//!
//! ## Usage
//!
//! ```rust
//! use king_bowl::cart_actor::{self, CartAction, CartContext};
//! use king_bowl::catalog::Catalog;
//! use king_bowl::model::{CartCreate, MenuItemId};
//! use king_bowl::pricing::Pricing;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = cart_actor::new(16);
//!     let ctx = CartContext::new(Arc::new(Catalog::standard()), Pricing::default());
//!     tokio::spawn(actor.run(ctx));
//!
//!     let cart = client.create(CartCreate::default()).await.unwrap();
//!     let summary = client
//!         .perform_action(cart, CartAction::add(MenuItemId(9), 2))
//!         .await
//!         .unwrap();
//!     assert_eq!(summary.item_count, 2);
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::MAX_QUANTITY;
pub use error::*;

use crate::catalog::Catalog;
use crate::model::Cart;
use crate::pricing::Pricing;
use kcb_framework::{JsonPersistence, KeyValueStore, ResourceActor, ResourceClient};
use std::sync::Arc;

/// Store key holding every cart.
pub const CART_KEY: &str = "kcb_cart";

/// What cart actions need: the menu to resolve dishes and the GST rate.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<Catalog>,
    pub pricing: Pricing,
}

impl CartContext {
    pub fn new(catalog: Arc<Catalog>, pricing: Pricing) -> Self {
        Self { catalog, pricing }
    }
}

/// Creates a new Cart actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(mailbox_size)
}

/// Persistence of all carts under [`CART_KEY`].
pub fn persistence(store: Arc<dyn KeyValueStore>) -> JsonPersistence<Cart> {
    JsonPersistence::new(store, CART_KEY)
}

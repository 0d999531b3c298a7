//! # KCB Framework
//!
//! Building blocks for the King Chinese Bowl ordering core: a small, type-safe
//! resource/actor runtime on Tokio, plus the key/value storage that keeps carts and
//! the order ledger across restarts.
//!
//! ## Resources as actors
//!
//! Every resource kind (cart, staff order, staff member, reservation) is owned by
//! exactly one [`ResourceActor`]. Callers never touch the state directly: they hold a
//! [`ResourceClient`] and send CRUD or `Action` messages. Each actor handles its
//! messages one at a time, so the POS, the kitchen board and the dashboard can all
//! work on the same ledger concurrently and still see one consistent sequence of
//! changes.
//!
//! The crate is split the same way the runtime is:
//!
//! 1. **Entity layer** ([`ActorEntity`]): the resource's data and business rules.
//! 2. **Runtime layer** ([`ResourceActor`]): mailbox, sequential processing,
//!    persistence, change notification.
//! 3. **Interface layer** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Context injection
//!
//! Dependencies reach an entity through `run(context)`, not through the constructor.
//! The order ledger, for example, is started with the menu catalog and pricing rules
//! as its context:
//!
//! ```rust
//! use kcb_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Prices { tax_rate: f64 }
//!
//! #[derive(Clone, Debug)] struct Bill { id: u32, subtotal: f64, total: f64 }
//! #[derive(Debug)] struct BillCreate { subtotal: f64 }
//! #[derive(Debug)] enum BillAction {}
//! #[derive(Debug, thiserror::Error)] #[error("bill error")] struct BillError;
//!
//! #[async_trait]
//! impl ActorEntity for Bill {
//!     type Id = u32; type Create = BillCreate; type Update = (); type Action = BillAction;
//!     type ActionResult = (); type Context = Arc<Prices>; type Error = BillError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, p: BillCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, subtotal: p.subtotal, total: 0.0 })
//!     }
//!     async fn on_create(&mut self, prices: &Arc<Prices>) -> Result<(), Self::Error> {
//!         self.total = self.subtotal * (1.0 + prices.tax_rate);
//!         Ok(())
//!     }
//!     async fn on_update(&mut self, _: (), _: &Arc<Prices>) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: BillAction, _: &Arc<Prices>) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Bill>::new(10);
//!     tokio::spawn(actor.run(Arc::new(Prices { tax_rate: 0.05 })));
//!
//!     let id = client.create(BillCreate { subtotal: 100.0 }).await.unwrap();
//!     let bill = client.get(id).await.unwrap().unwrap();
//!     assert!((bill.total - 105.0).abs() < 1e-9);
//! }
//! ```
//!
//! ## Persistence
//!
//! [`JsonPersistence`] mirrors an actor's store into a [`KeyValueStore`] after every
//! committed mutation and restores it on start. [`MemoryStore`] is the in-process
//! backend; [`FileStore`] keeps one JSON file per key.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers client requests from queued expectations, for testing
//! code around a client without running the actor behind it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod persistence;
pub mod storage;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, StorageError};
pub use message::{ResourceRequest, Response};
pub use persistence::{JsonPersistence, Persistence, Snapshot};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

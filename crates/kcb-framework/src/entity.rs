//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every resource kept by the ordering core
//! (carts, staff orders, staff members, reservations) implements so it can be owned by
//! the generic [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin each resource to its own DTOs: a `Cart` actor only accepts
//! cart actions, and the compiler rejects an order action sent to it.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other actors or simulated latency.
/// The `Context` type is injected into every hook when the actor starts running
/// ("late binding"), which is how the order ledger reaches the menu catalog and
/// pricing rules without holding them at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier. Sequential numbers are generated by the actor, so it must be
    /// convertible from `u32`; `Ord` gives listings a stable order.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Advance`, `AddItem`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor rather than one per action; clients downcast
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) back to it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this entity is stored under. Used to rebuild the store
    /// from a persisted snapshot.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the generated ID and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored.
    /// Returning an error discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

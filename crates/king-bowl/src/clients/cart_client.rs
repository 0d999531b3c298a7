//! # Cart Client
//!
//! High-level API over the Cart actor: open a cart, run reducer actions, read totals.

use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, CartItem, CartSummary, MenuItemId, SpiceLevel};
use crate::pricing::Pricing;
use async_trait::async_trait;
use kcb_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    pricing: Pricing,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CartError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, pricing: Pricing) -> Self {
        Self { inner, pricing }
    }

    #[instrument(skip(self))]
    pub async fn open_cart(&self, session: Option<String>) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate { session })
            .await
            .map_err(Self::map_error)
    }

    /// The cart, or `NotFound`.
    #[instrument(skip(self))]
    pub async fn cart(&self, id: CartId) -> Result<Cart, CartError> {
        self.get(id)
            .await?
            .ok_or_else(|| CartError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, id: CartId) -> Result<CartSummary, CartError> {
        Ok(self.cart(id).await?.summary(&self.pricing))
    }

    #[instrument(skip(self))]
    pub async fn apply(&self, id: CartId, action: CartAction) -> Result<CartSummary, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    pub async fn add_item(
        &self,
        id: CartId,
        menu_item_id: MenuItemId,
        quantity: u32,
    ) -> Result<CartSummary, CartError> {
        self.apply(id, CartAction::add(menu_item_id, quantity)).await
    }

    pub async fn set_quantity(
        &self,
        id: CartId,
        menu_item_id: MenuItemId,
        quantity: u32,
    ) -> Result<CartSummary, CartError> {
        self.apply(id, CartAction::SetQuantity { menu_item_id, quantity })
            .await
    }

    pub async fn set_instructions(
        &self,
        id: CartId,
        menu_item_id: MenuItemId,
        instructions: impl Into<String>,
    ) -> Result<CartSummary, CartError> {
        let instructions = instructions.into();
        self.apply(id, CartAction::SetInstructions { menu_item_id, instructions })
            .await
    }

    pub async fn set_spice_level(
        &self,
        id: CartId,
        menu_item_id: MenuItemId,
        spice_level: SpiceLevel,
    ) -> Result<CartSummary, CartError> {
        self.apply(id, CartAction::SetSpiceLevel { menu_item_id, spice_level })
            .await
    }

    pub async fn remove_item(
        &self,
        id: CartId,
        menu_item_id: MenuItemId,
    ) -> Result<CartSummary, CartError> {
        self.apply(id, CartAction::RemoveItem { menu_item_id }).await
    }

    pub async fn clear(&self, id: CartId) -> Result<CartSummary, CartError> {
        self.apply(id, CartAction::Clear).await
    }

    /// Removes the billed `lines` from the cart in one step.
    pub async fn settle(&self, id: CartId, lines: &[CartItem]) -> Result<CartSummary, CartError> {
        let lines = lines
            .iter()
            .map(|line| (line.menu_item_id, line.quantity))
            .collect();
        self.apply(id, CartAction::Settle { lines }).await
    }
}

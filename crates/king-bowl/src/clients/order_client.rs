//! # Order Client
//!
//! High-level API over the order ledger, shared by the POS, the kitchen board and
//! the orders dashboard.

use crate::model::{ItemStatus, OrderCreate, OrderId, OrderStatus, StaffOrder};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use kcb_framework::{ActorClient, FrameworkError, ResourceClient};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<StaffOrder>,
}

#[async_trait]
impl ActorClient<StaffOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<StaffOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<StaffOrder>) -> Self {
        Self { inner }
    }

    /// Adds an order to the ledger and returns its number.
    #[instrument(skip(self, params), fields(order_type = %params.order_type, lines = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order = %id, "Order placed");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<StaffOrder, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn act(&self, id: OrderId, action: OrderAction) -> Result<StaffOrder, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Moves the order one step along `new → preparing → ready → completed`.
    pub async fn advance(&self, id: OrderId) -> Result<StaffOrder, OrderError> {
        self.act(id, OrderAction::Advance).await
    }

    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<StaffOrder, OrderError> {
        self.act(id, OrderAction::SetStatus(status)).await
    }

    pub async fn cancel(
        &self,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<StaffOrder, OrderError> {
        self.act(id, OrderAction::Cancel { reason }).await
    }

    pub async fn set_item_status(
        &self,
        id: OrderId,
        index: usize,
        status: ItemStatus,
    ) -> Result<StaffOrder, OrderError> {
        self.act(id, OrderAction::SetItemStatus { index, status })
            .await
    }

    /// Orders still on the kitchen board, oldest first.
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> Result<Vec<StaffOrder>, OrderError> {
        let mut orders = self.list().await?;
        orders.retain(|order| order.status.is_active());
        Ok(orders)
    }

    /// Wakes whenever the ledger changes.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.inner.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision()
    }
}

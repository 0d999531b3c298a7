//! Kitchen board: active orders in new / preparing / ready columns.

use crate::clients::OrderClient;
use crate::model::{ItemStatus, OrderId, OrderItem, OrderStatus, StaffOrder};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenTicket {
    pub id: OrderId,
    /// "Table 4" or "Takeaway".
    pub label: String,
    pub status: OrderStatus,
    pub elapsed_minutes: i64,
    pub items: Vec<OrderItem>,
    pub created_by: String,
    /// Caption of the advance button, if the order can move on.
    pub next_action: Option<&'static str>,
}

impl KitchenTicket {
    pub fn from_order(order: &StaffOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: order.id,
            label: order.label(),
            status: order.status,
            elapsed_minutes: (now - order.created_at).num_minutes().max(0),
            items: order.items.clone(),
            created_by: order.created_by.clone(),
            next_action: order.status.next_action_label(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitchenBoard {
    pub new: Vec<KitchenTicket>,
    pub preparing: Vec<KitchenTicket>,
    pub ready: Vec<KitchenTicket>,
}

impl KitchenBoard {
    /// Groups the active orders in `orders` by status, oldest first. Completed and
    /// cancelled orders are left off.
    pub fn build(orders: &[StaffOrder], now: DateTime<Utc>) -> Self {
        let mut active: Vec<&StaffOrder> = orders
            .iter()
            .filter(|order| order.status.is_active())
            .collect();
        active.sort_by_key(|order| (order.created_at, order.id));

        let mut board = Self::default();
        for order in active {
            let ticket = KitchenTicket::from_order(order, now);
            match order.status {
                OrderStatus::New => board.new.push(ticket),
                OrderStatus::Preparing => board.preparing.push(ticket),
                OrderStatus::Ready => board.ready.push(ticket),
                OrderStatus::Completed | OrderStatus::Cancelled => {}
            }
        }
        board
    }

    pub fn len(&self) -> usize {
        self.new.len() + self.preparing.len() + self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The kitchen screen: a live board over the order ledger.
pub struct KitchenDisplay {
    orders: OrderClient,
    changes: watch::Receiver<u64>,
}

impl KitchenDisplay {
    pub fn new(orders: OrderClient) -> Self {
        let changes = orders.changes();
        Self { orders, changes }
    }

    pub async fn board(&self) -> Result<KitchenBoard, OrderError> {
        let orders = self.orders.active_orders().await?;
        Ok(KitchenBoard::build(&orders, Utc::now()))
    }

    /// Waits for the next ledger change, then rebuilds the board.
    #[instrument(skip(self))]
    pub async fn wait_for_change(&mut self) -> Result<KitchenBoard, OrderError> {
        self.changes
            .changed()
            .await
            .map_err(|_| OrderError::ActorCommunicationError("order ledger closed".to_string()))?;
        debug!(revision = *self.changes.borrow_and_update(), "Ledger changed");
        self.board().await
    }

    pub async fn advance(&self, id: OrderId) -> Result<StaffOrder, OrderError> {
        self.orders.advance(id).await
    }

    pub async fn set_item_status(
        &self,
        id: OrderId,
        index: usize,
        status: ItemStatus,
    ) -> Result<StaffOrder, OrderError> {
        self.orders.set_item_status(id, index, status).await
    }
}

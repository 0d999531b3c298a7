//! Staff orders: the ledger shared by the POS, the kitchen display and the
//! orders dashboard.
//!
//! # Actor Framework
//! [`StaffOrder`] is managed by a [`ResourceActor`](kcb_framework::ResourceActor).
//! See `crate::order_actor` for creation, the status state machine and the
//! persistence keys.

use crate::model::MenuItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Sequential order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderType::DineIn => "Dine-in",
            OrderType::Takeaway => "Takeaway",
        })
    }
}

/// Overall order status.
///
/// ```text
/// new -> preparing -> ready -> completed
///  \________\___________\-----> cancelled
/// ```
///
/// The derived ordering follows the happy path, which is what lets item updates
/// refuse to move an order backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The status the kitchen's advance button moves to.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    /// Whether the dashboard shows the cancel button.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Still on the kitchen board.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        self.next() == Some(to) || (to == OrderStatus::Cancelled && self.can_cancel())
    }

    /// Caption of the kitchen's advance button.
    pub fn next_action_label(&self) -> Option<&'static str> {
        match self {
            OrderStatus::New => Some("Start Preparing"),
            OrderStatus::Preparing => Some("Mark Ready"),
            OrderStatus::Ready => Some("Complete"),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Kitchen progress of a single line. Only ever moves forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::Preparing => "Preparing",
            ItemStatus::Ready => "Ready",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub notes: String,
    pub status: ItemStatus,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffOrder {
    pub id: OrderId,
    pub order_type: OrderType,
    /// Always `Some` for dine-in, always `None` for takeaway.
    pub table_number: Option<u8>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub cancel_reason: Option<String>,
}

impl StaffOrder {
    /// "Table 4" or "Takeaway".
    pub fn label(&self) -> String {
        match (self.order_type, self.table_number) {
            (OrderType::DineIn, Some(table)) => format!("Table {table}"),
            (OrderType::DineIn, None) => "Dine-in".to_string(),
            (OrderType::Takeaway, _) => "Takeaway".to_string(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub notes: String,
}

/// Payload for creating a new order. Names and prices come from the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub order_type: OrderType,
    pub table_number: Option<u8>,
    pub items: Vec<OrderLine>,
    /// Name of the logged-in staff member.
    pub created_by: String,
}

//! Custom actions for the Order actor.
//!
//! Every action answers with the order as it stands after the change, so the
//! kitchen and the dashboard can redraw a ticket without a second round trip.

use crate::model::{ItemStatus, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Kitchen tap: move to `status.next()`.
    Advance,
    /// Move to a specific status; must be a legal transition.
    SetStatus(OrderStatus),
    /// Dashboard cancel, allowed from any non-terminal status.
    Cancel { reason: Option<String> },
    /// Kitchen per-line progress. The overall status follows the items.
    SetItemStatus { index: usize, status: ItemStatus },
}

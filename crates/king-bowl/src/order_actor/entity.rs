//! Order status state machine and the [`ActorEntity`] implementation for
//! [`StaffOrder`].
//!
//! Transitions:
//! - `advance` moves one step along `new -> preparing -> ready -> completed`.
//!   Entering `preparing` starts every pending item; entering `ready` finishes all.
//! - `cancel` is allowed from any non-terminal status.
//! - `set_item_status` moves a single line forward, then lifts the overall status
//!   to what the items imply. The overall status never moves backwards.

use super::{OrderAction, OrderContext, OrderError};
use crate::model::{
    ItemStatus, OrderCreate, OrderId, OrderItem, OrderStatus, OrderType, StaffOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kcb_framework::ActorEntity;

impl StaffOrder {
    /// Moves to `to` if the state machine allows it.
    pub fn transition(
        &mut self,
        to: OrderStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        if !self.status.can_transition_to(to) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        match to {
            OrderStatus::Preparing => {
                for item in &mut self.items {
                    if item.status == ItemStatus::Pending {
                        item.status = ItemStatus::Preparing;
                    }
                }
            }
            OrderStatus::Ready => {
                for item in &mut self.items {
                    item.status = ItemStatus::Ready;
                }
            }
            OrderStatus::Completed => self.completed_at = Some(now),
            OrderStatus::Cancelled => {
                self.cancelled_at = Some(now);
                self.cancel_reason = reason
                    .map(|reason| reason.trim().to_string())
                    .filter(|reason| !reason.is_empty());
            }
            OrderStatus::New => {}
        }

        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    /// One kitchen tap. Returns the new status.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<OrderStatus, OrderError> {
        let to = self
            .status
            .next()
            .ok_or(OrderError::NoNextStatus(self.status))?;
        self.transition(to, None, now)?;
        Ok(to)
    }

    pub fn cancel(&mut self, reason: Option<String>, now: DateTime<Utc>) -> Result<(), OrderError> {
        self.transition(OrderStatus::Cancelled, reason, now)
    }

    pub fn set_item_status(
        &mut self,
        index: usize,
        status: ItemStatus,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::OrderClosed(self.status));
        }
        let item = self
            .items
            .get_mut(index)
            .ok_or(OrderError::NoSuchItem(index))?;
        if status < item.status {
            return Err(OrderError::InvalidItemTransition {
                from: item.status,
                to: status,
            });
        }
        item.status = status;

        let derived = self.derived_status();
        if derived > self.status {
            self.status = derived;
        }
        self.updated_at = now;
        Ok(())
    }

    /// The status the item lines imply on their own.
    pub fn derived_status(&self) -> OrderStatus {
        if !self.items.is_empty() && self.items.iter().all(|item| item.status == ItemStatus::Ready)
        {
            OrderStatus::Ready
        } else if self.items.iter().any(|item| item.status != ItemStatus::Pending) {
            OrderStatus::Preparing
        } else {
            OrderStatus::New
        }
    }
}

#[async_trait]
impl ActorEntity for StaffOrder {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = StaffOrder;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Checks the ticket's shape. Names, prices and the table range need the
    /// context and are filled in by `on_create`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if params.created_by.trim().is_empty() {
            return Err(OrderError::MissingCreator);
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.menu_item_id));
        }
        let table_number = match params.order_type {
            OrderType::DineIn => Some(params.table_number.ok_or(OrderError::MissingTable)?),
            OrderType::Takeaway => None,
        };

        let now = Utc::now();
        Ok(Self {
            id,
            order_type: params.order_type,
            table_number,
            items: params
                .items
                .into_iter()
                .map(|line| OrderItem {
                    menu_item_id: line.menu_item_id,
                    name: String::new(),
                    unit_price: 0.0,
                    quantity: line.quantity,
                    notes: line.notes.trim().to_string(),
                    status: ItemStatus::Pending,
                })
                .collect(),
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            status: OrderStatus::New,
            created_at: now,
            updated_at: now,
            completed_at: None,
            cancelled_at: None,
            created_by: params.created_by.trim().to_string(),
            cancel_reason: None,
        })
    }

    /// Prices every line from the menu and computes the bill.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        if let Some(table) = self.table_number {
            if table == 0 || table > ctx.table_count {
                return Err(OrderError::InvalidTable {
                    table,
                    max: ctx.table_count,
                });
            }
        }

        for item in &mut self.items {
            let dish = ctx
                .catalog
                .get(item.menu_item_id)
                .ok_or(OrderError::UnknownMenuItem(item.menu_item_id))?;
            item.name = dish.name.clone();
            item.unit_price = dish.price;
        }

        let bill = ctx
            .pricing
            .bill(self.items.iter().map(|item| (item.unit_price, item.quantity)));
        self.subtotal = bill.subtotal;
        self.tax = bill.tax;
        self.total = bill.total;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::DeleteNotAllowed)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<StaffOrder, Self::Error> {
        let now = Utc::now();
        match action {
            OrderAction::Advance => {
                self.advance(now)?;
            }
            OrderAction::SetStatus(to) => self.transition(to, None, now)?,
            OrderAction::Cancel { reason } => self.cancel(reason, now)?,
            OrderAction::SetItemStatus { index, status } => {
                self.set_item_status(index, status, now)?
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItemId, OrderLine};

    fn order(lines: usize) -> StaffOrder {
        let params = OrderCreate {
            order_type: OrderType::DineIn,
            table_number: Some(4),
            items: (1..=lines as u32)
                .map(|id| OrderLine {
                    menu_item_id: MenuItemId(id),
                    quantity: 1,
                    notes: String::new(),
                })
                .collect(),
            created_by: "Priya Sharma".to_string(),
        };
        StaffOrder::from_create_params(OrderId(1), params).unwrap()
    }

    #[test]
    fn test_create_validates_shape() {
        let base = OrderCreate {
            order_type: OrderType::DineIn,
            table_number: None,
            items: vec![OrderLine {
                menu_item_id: MenuItemId(1),
                quantity: 1,
                notes: String::new(),
            }],
            created_by: "Priya".to_string(),
        };

        let err = StaffOrder::from_create_params(OrderId(1), base.clone()).unwrap_err();
        assert_eq!(err, OrderError::MissingTable);

        let takeaway = OrderCreate {
            order_type: OrderType::Takeaway,
            table_number: Some(9),
            ..base.clone()
        };
        let order = StaffOrder::from_create_params(OrderId(1), takeaway).unwrap();
        assert_eq!(order.table_number, None);
        assert_eq!(order.status, OrderStatus::New);

        let empty = OrderCreate {
            items: vec![],
            table_number: Some(1),
            ..base.clone()
        };
        assert_eq!(
            StaffOrder::from_create_params(OrderId(1), empty).unwrap_err(),
            OrderError::EmptyOrder
        );

        let nobody = OrderCreate {
            created_by: "  ".to_string(),
            table_number: Some(1),
            ..base
        };
        assert_eq!(
            StaffOrder::from_create_params(OrderId(1), nobody).unwrap_err(),
            OrderError::MissingCreator
        );
    }

    #[test]
    fn test_advance_walks_the_happy_path() {
        let mut order = order(2);
        let now = Utc::now();

        assert_eq!(order.advance(now).unwrap(), OrderStatus::Preparing);
        assert!(order.items.iter().all(|i| i.status == ItemStatus::Preparing));

        assert_eq!(order.advance(now).unwrap(), OrderStatus::Ready);
        assert!(order.items.iter().all(|i| i.status == ItemStatus::Ready));

        assert_eq!(order.advance(now).unwrap(), OrderStatus::Completed);
        assert_eq!(order.completed_at, Some(now));

        assert_eq!(
            order.advance(now),
            Err(OrderError::NoNextStatus(OrderStatus::Completed))
        );
    }

    #[test]
    fn test_cancel_from_any_non_terminal_status() {
        let now = Utc::now();
        for steps in 0..3 {
            let mut order = order(1);
            for _ in 0..steps {
                order.advance(now).unwrap();
            }
            order.cancel(Some(" customer left ".to_string()), now).unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
            assert_eq!(order.cancel_reason.as_deref(), Some("customer left"));
            assert_eq!(order.cancelled_at, Some(now));
        }
    }

    #[test]
    fn test_terminal_orders_reject_changes() {
        let now = Utc::now();
        let mut order = order(1);
        order.cancel(None, now).unwrap();

        assert_eq!(
            order.cancel(None, now),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Cancelled
            })
        );
        assert_eq!(
            order.set_item_status(0, ItemStatus::Ready, now),
            Err(OrderError::OrderClosed(OrderStatus::Cancelled))
        );
    }

    #[test]
    fn test_skipping_a_step_is_rejected() {
        let mut order = order(1);
        let err = order
            .transition(OrderStatus::Completed, None, Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::New,
                to: OrderStatus::Completed
            }
        );
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn test_item_updates_drive_overall_status() {
        let now = Utc::now();
        let mut order = order(2);

        order.set_item_status(0, ItemStatus::Preparing, now).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);

        order.set_item_status(0, ItemStatus::Ready, now).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);

        order.set_item_status(1, ItemStatus::Ready, now).unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.derived_status(), OrderStatus::Ready);
    }

    #[test]
    fn test_items_and_status_never_move_backwards() {
        let now = Utc::now();
        let mut order = order(2);
        order.advance(now).unwrap();

        assert_eq!(
            order.set_item_status(0, ItemStatus::Pending, now),
            Err(OrderError::InvalidItemTransition {
                from: ItemStatus::Preparing,
                to: ItemStatus::Pending
            })
        );
        assert_eq!(
            order.set_item_status(5, ItemStatus::Ready, now),
            Err(OrderError::NoSuchItem(5))
        );

        // Setting an item to its current status is a no-op, not a regression.
        order.set_item_status(1, ItemStatus::Preparing, now).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
    }
}

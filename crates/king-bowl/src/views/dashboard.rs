//! Orders dashboard: the whole ledger with filters and headline numbers.

use crate::clients::OrderClient;
use crate::model::{OrderId, OrderStatus, OrderType, StaffOrder};
use crate::order_actor::OrderError;
use crate::pricing::round_money;
use kcb_framework::ActorClient;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    /// Case-insensitive; matched against the order number, table, creator and
    /// item names.
    pub query: Option<String>,
}

impl OrderFilter {
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, order: &StaffOrder) -> bool {
        if self.status.is_some_and(|status| order.status != status) {
            return false;
        }
        if self.order_type.is_some_and(|order_type| order.order_type != order_type) {
            return false;
        }
        let query = match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => query.to_lowercase(),
            _ => return true,
        };
        order.id.to_string().contains(&query)
            || order.label().to_lowercase().contains(&query)
            || order.created_by.to_lowercase().contains(&query)
            || order
                .items
                .iter()
                .any(|item| item.name.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of completed order totals.
    pub revenue: f64,
    /// Mean completed order total, 0 with no completed orders.
    pub average_order_value: f64,
}

impl OrderStats {
    pub fn from_orders(orders: &[StaffOrder]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            ..Self::default()
        };
        let mut revenue = 0.0;
        for order in orders {
            match order.status {
                OrderStatus::Completed => {
                    stats.completed += 1;
                    revenue += order.total;
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
                _ => stats.active += 1,
            }
        }
        stats.revenue = round_money(revenue);
        if stats.completed > 0 {
            stats.average_order_value = round_money(revenue / stats.completed as f64);
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Matching orders, newest first.
    pub orders: Vec<StaffOrder>,
    /// Over the whole ledger, not just the filtered orders.
    pub stats: OrderStats,
}

impl DashboardView {
    pub fn build(all: Vec<StaffOrder>, filter: &OrderFilter) -> Self {
        let stats = OrderStats::from_orders(&all);
        let mut orders: Vec<StaffOrder> = all
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Self { orders, stats }
    }
}

pub struct OrdersDashboard {
    orders: OrderClient,
}

impl OrdersDashboard {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    #[instrument(skip(self))]
    pub async fn view(&self, filter: &OrderFilter) -> Result<DashboardView, OrderError> {
        let all = self.orders.list().await?;
        Ok(DashboardView::build(all, filter))
    }

    /// Cancels an order that has not been completed or cancelled already.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<StaffOrder, OrderError> {
        let order = self.orders.cancel(id, reason).await?;
        info!(order = %id, "Order cancelled from dashboard");
        Ok(order)
    }

    pub fn changes(&self) -> watch::Receiver<u64> {
        self.orders.changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemStatus, MenuItemId, OrderItem};
    use chrono::{Duration, Utc};

    fn order(id: u32, status: OrderStatus, total: f64) -> StaffOrder {
        let created_at = Utc::now() - Duration::minutes(i64::from(100 - id));
        StaffOrder {
            id: OrderId(id),
            order_type: if id % 2 == 0 {
                OrderType::Takeaway
            } else {
                OrderType::DineIn
            },
            table_number: if id % 2 == 0 { None } else { Some(3) },
            items: vec![OrderItem {
                menu_item_id: MenuItemId(17),
                name: "Kung Pao Chicken".to_string(),
                unit_price: total,
                quantity: 1,
                notes: String::new(),
                status: ItemStatus::Pending,
            }],
            subtotal: total,
            tax: 0.0,
            total,
            status,
            created_at,
            updated_at: created_at,
            completed_at: None,
            cancelled_at: None,
            created_by: if id == 1 { "Rajesh Kumar" } else { "Priya Sharma" }.to_string(),
            cancel_reason: None,
        }
    }

    fn ledger() -> Vec<StaffOrder> {
        vec![
            order(1, OrderStatus::Completed, 336.0),
            order(2, OrderStatus::Completed, 420.0),
            order(3, OrderStatus::Cancelled, 189.0),
            order(4, OrderStatus::Preparing, 262.5),
            order(5, OrderStatus::New, 210.0),
        ]
    }

    #[test]
    fn test_stats_count_revenue_from_completed_only() {
        let stats = OrderStats::from_orders(&ledger());
        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.revenue, 756.0);
        assert_eq!(stats.average_order_value, 378.0);

        assert_eq!(OrderStats::from_orders(&[]).average_order_value, 0.0);
    }

    #[test]
    fn test_filters_combine() {
        let takeaway = OrderFilter::default().order_type(OrderType::Takeaway);
        let view = DashboardView::build(ledger(), &takeaway);
        assert_eq!(
            view.orders.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![OrderId(4), OrderId(2)]
        );
        assert_eq!(view.stats.total_orders, 5);

        let completed_takeaway = takeaway.status(OrderStatus::Completed);
        assert_eq!(DashboardView::build(ledger(), &completed_takeaway).orders.len(), 1);
    }

    #[test]
    fn test_query_matches_number_table_creator_and_items() {
        let orders = ledger();
        let hits = |query: &str| {
            let filter = OrderFilter::default().query(query);
            orders.iter().filter(|o| filter.matches(o)).count()
        };
        assert_eq!(hits("#0003"), 1);
        assert_eq!(hits("table 3"), 3);
        assert_eq!(hits("rajesh"), 1);
        assert_eq!(hits("KUNG PAO"), 5);
        assert_eq!(hits("   "), 5);
        assert_eq!(hits("biryani"), 0);
    }
}

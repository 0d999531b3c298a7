//! Starts, wires and stops every actor behind the restaurant.

use crate::cart_actor::{self, CartContext};
use crate::catalog::Catalog;
use crate::checkout::Checkout;
use crate::clients::{CartClient, OrderClient, ReservationClient, StaffClient};
use crate::config::{AppConfig, StorageBackend};
use crate::order_actor::{self, OrderContext};
use crate::pricing::Pricing;
use crate::reservation_actor;
use crate::staff_actor::{self, SessionStore, StaffError};
use crate::views::{KitchenDisplay, OrdersDashboard};
use kcb_framework::{FileStore, KeyValueStore, MemoryStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to seed staff roster: {0}")]
    Staff(#[from] StaffError),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The running restaurant: one actor per resource plus checkout.
///
/// Kitchen displays and dashboards hold clients of their own; drop them before
/// calling [`RestaurantSystem::shutdown`], which waits for every mailbox to close.
pub struct RestaurantSystem {
    pub carts: CartClient,
    pub orders: OrderClient,
    pub staff: StaffClient,
    pub reservations: ReservationClient,
    pub checkout: Checkout,
    pub catalog: Arc<Catalog>,
    pub pricing: Pricing,
    store: Arc<dyn KeyValueStore>,
    handles: Vec<JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Opens the configured store and starts the system on it.
    pub async fn start(config: &AppConfig) -> Result<Self, SystemError> {
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::open(&config.storage.dir).await?),
        };
        Self::with_store(config, store).await
    }

    /// Starts every actor on `store`. Carts and the order ledger are restored from
    /// it; the staff roster is seeded fresh.
    pub async fn with_store(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SystemError> {
        let mailbox = config.actors.mailbox_size;
        let catalog = Arc::new(Catalog::standard());
        let pricing = config.pricing;

        // 1. Create actors
        let (cart_actor, cart_client) = cart_actor::new(mailbox);
        let (order_actor, order_client) =
            order_actor::new(mailbox, config.actors.first_order_number);
        let (staff_actor, staff_client) = staff_actor::new(mailbox);
        let (reservation_actor, reservation_client) = reservation_actor::new(mailbox);

        // 2. Start them with their context
        let handles = vec![
            tokio::spawn(
                cart_actor
                    .with_persistence(cart_actor::persistence(store.clone()))
                    .run(CartContext::new(catalog.clone(), pricing)),
            ),
            tokio::spawn(
                order_actor
                    .with_persistence(order_actor::persistence(store.clone()))
                    .run(OrderContext {
                        catalog: catalog.clone(),
                        pricing,
                        table_count: config.restaurant.table_count,
                    }),
            ),
            tokio::spawn(staff_actor.run(())),
            tokio::spawn(reservation_actor.run(())),
        ];

        let carts = CartClient::new(cart_client, pricing);
        let staff = StaffClient::new(staff_client, SessionStore::new(store.clone()));
        for member in staff_actor::roster() {
            staff.add_member(member).await?;
        }

        info!(
            restaurant = %config.restaurant.name,
            tables = config.restaurant.table_count,
            dishes = catalog.len(),
            "Restaurant system started"
        );

        Ok(Self {
            checkout: Checkout::new(
                carts.clone(),
                pricing,
                config.simulation.checkout_latency(),
            ),
            carts,
            orders: OrderClient::new(order_client),
            staff,
            reservations: ReservationClient::new(
                reservation_client,
                config.simulation.reservation_latency(),
            ),
            catalog,
            pricing,
            store,
            handles,
        })
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn kitchen(&self) -> KitchenDisplay {
        KitchenDisplay::new(self.orders.clone())
    }

    pub fn dashboard(&self) -> OrdersDashboard {
        OrdersDashboard::new(self.orders.clone())
    }

    /// Drops every client so the mailboxes close, then waits for the actors.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down restaurant system...");
        let Self {
            carts,
            orders,
            staff,
            reservations,
            checkout,
            handles,
            ..
        } = self;
        drop(checkout);
        drop(carts);
        drop(orders);
        drop(staff);
        drop(reservations);

        join_actors(handles).await?;
        info!("Restaurant system shutdown complete");
        Ok(())
    }
}

/// Waits for every actor task. Failures are logged as they come; the first one
/// is returned once all tasks are done.
async fn join_actors(handles: Vec<JoinHandle<()>>) -> Result<(), SystemError> {
    let mut first = None;
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Actor task failed");
            first.get_or_insert(SystemError::ActorTask(e.to_string()));
        }
    }
    first.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_waits_for_all_actors_after_a_failure() {
        let finished = Arc::new(AtomicBool::new(false));
        let failing: JoinHandle<()> = tokio::spawn(async { panic!("actor crashed") });
        let slow = tokio::spawn({
            let finished = finished.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                finished.store(true, Ordering::SeqCst);
            }
        });

        let result = join_actors(vec![failing, slow]).await;
        assert!(matches!(result, Err(SystemError::ActorTask(_))));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_join_ok_when_all_actors_stop_cleanly() {
        let handles = vec![tokio::spawn(async {}), tokio::spawn(async {})];
        assert!(join_actors(handles).await.is_ok());
    }
}

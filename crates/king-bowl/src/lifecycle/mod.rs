//! # System Lifecycle
//!
//! [`RestaurantSystem`] creates every actor without dependencies, then injects each
//! one's context through `run(context)`: the menu catalog and pricing for carts and
//! orders, the table count for orders, the simulated latency for reservations.
//!
//! Shutdown drops all clients. Each actor sees its mailbox close, logs its final
//! size and exits; [`RestaurantSystem::shutdown`] waits for all of them.
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the binary.

pub mod restaurant_system;
pub mod tracing;

pub use self::restaurant_system::*;
pub use self::tracing::*;

//! Typed clients over each actor's [`ResourceClient`](kcb_framework::ResourceClient).
//!
//! Framework errors are mapped back to the actor's own error type: entity errors are
//! downcast, a missing id becomes `NotFound`, anything else is a communication error.

pub mod cart_client;
pub mod order_client;
pub mod reservation_client;
pub mod staff_client;

pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use reservation_client::ReservationClient;
pub use staff_client::StaffClient;

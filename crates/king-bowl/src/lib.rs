//! # King Chinese Bowl
//!
//! Ordering core for the restaurant: customer carts and checkout, the staff order
//! ledger with its status state machine, PIN login, reservations, and the POS,
//! kitchen and dashboard views over them.
//!
//! Each resource is owned by one actor from [`kcb_framework`]:
//!
//! - [`cart_actor`] - carts, changed through a reducer of [`cart_actor::CartAction`]s
//! - [`order_actor`] - the ledger; orders move `new → preparing → ready → completed`
//!   or are cancelled
//! - [`staff_actor`] - the roster and the logged-in session
//! - [`reservation_actor`] - table bookings
//!
//! [`clients`] wrap each actor in a typed API, [`views`] build the staff screens from
//! them and [`lifecycle::RestaurantSystem`] starts and stops the lot.
//!
//! ## Testing
//!
//! See [`kcb_framework::mock`] for driving a client without the actor behind it.

pub mod cart_actor;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod reservation_actor;
pub mod staff_actor;
pub mod validation;
pub mod views;

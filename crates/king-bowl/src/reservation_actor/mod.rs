//! # Reservation Actor
//!
//! Accepts table bookings. Requests are validated field by field before an id is
//! issued; accepted bookings are held in memory only. Cancelling a booking deletes it.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Reservation;
use kcb_framework::{ResourceActor, ResourceClient};

/// Reservations have no custom actions.
#[derive(Debug, Clone)]
pub enum ReservationAction {}

/// Creates a new Reservation actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<Reservation>, ResourceClient<Reservation>) {
    ResourceActor::new(mailbox_size)
}

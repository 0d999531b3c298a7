//! Error types for the Reservation actor.

use crate::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReservationError {
    /// One or more form fields failed validation.
    #[error("Invalid reservation: {0}")]
    Invalid(FieldErrors),

    #[error("Reservation not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

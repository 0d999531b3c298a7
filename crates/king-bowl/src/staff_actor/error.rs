//! Error types for the Staff actor and staff login.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StaffError {
    #[error("Staff member not found: {0}")]
    NotFound(String),

    #[error("Staff name is required")]
    MissingName,

    #[error("PIN must be exactly 4 digits")]
    MalformedPin,

    /// No staff member has this PIN, or the current PIN did not match.
    #[error("Incorrect PIN")]
    InvalidPin,

    /// The session could not be written to or removed from the store.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

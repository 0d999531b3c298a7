//! # Staff Actor
//!
//! Holds the staff roster used for PIN login. The roster is seeded on start and not
//! persisted; only the logged-in [`StaffSession`](crate::model::StaffSession) is kept
//! in the store, by [`SessionStore`].

pub mod actions;
pub mod entity;
pub mod error;
pub mod session;

pub use actions::*;
pub use error::*;
pub use session::{SessionStore, SESSION_KEY};

use crate::model::{StaffCreate, StaffMember, StaffRole};
use kcb_framework::{ResourceActor, ResourceClient};

/// Creates a new Staff actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<StaffMember>, ResourceClient<StaffMember>) {
    ResourceActor::new(mailbox_size)
}

/// The staff a fresh install starts with.
pub fn roster() -> Vec<StaffCreate> {
    vec![
        StaffCreate::new("Rajesh Kumar", StaffRole::Manager, "1234"),
        StaffCreate::new("Priya Sharma", StaffRole::Cashier, "2345"),
        StaffCreate::new("Wong Li", StaffRole::Chef, "3456"),
        StaffCreate::new("Amit Patel", StaffRole::Waiter, "4567"),
        StaffCreate::new("Sunita Rao", StaffRole::Cashier, "5678"),
    ]
}

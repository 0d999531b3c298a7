//! The current staff session, kept under [`SESSION_KEY`].

use crate::model::StaffSession;
use kcb_framework::storage::{load_json, save_json};
use kcb_framework::{KeyValueStore, StorageError};
use std::sync::Arc;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "kcb_staff_session";

#[derive(Debug, Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The logged-in staff member, if any. An unreadable session counts as
    /// logged out.
    pub async fn current(&self) -> Option<StaffSession> {
        match load_json(self.store.as_ref(), SESSION_KEY).await {
            Ok(session) => session,
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "Discarding unreadable session");
                None
            }
        }
    }

    pub async fn save(&self, session: &StaffSession) -> Result<(), StorageError> {
        debug!(staff_id = %session.staff_id, "Saving session");
        save_json(self.store.as_ref(), SESSION_KEY, session).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY).await
    }
}

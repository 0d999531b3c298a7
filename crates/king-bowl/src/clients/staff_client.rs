//! # Staff Client
//!
//! PIN login against the roster held by the Staff actor. A successful login is
//! written to the session store so the staff screens survive a restart; logout
//! removes it.

use crate::model::{StaffCreate, StaffId, StaffMember, StaffSession};
use crate::staff_actor::{SessionStore, StaffAction, StaffError};
use crate::validation::is_valid_pin;
use async_trait::async_trait;
use kcb_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct StaffClient {
    inner: ResourceClient<StaffMember>,
    sessions: SessionStore,
}

#[async_trait]
impl ActorClient<StaffMember> for StaffClient {
    type Error = StaffError;

    fn inner(&self) -> &ResourceClient<StaffMember> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<StaffError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => StaffError::NotFound(id),
            Err(other) => StaffError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl StaffClient {
    pub fn new(inner: ResourceClient<StaffMember>, sessions: SessionStore) -> Self {
        Self { inner, sessions }
    }

    #[instrument(skip(self, params), fields(name = %params.name, role = %params.role))]
    pub async fn add_member(&self, params: StaffCreate) -> Result<StaffId, StaffError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Looks the PIN up in the roster and starts a session for its owner.
    #[instrument(skip(self, pin))]
    pub async fn login(&self, pin: &str) -> Result<StaffSession, StaffError> {
        if !is_valid_pin(pin) {
            return Err(StaffError::MalformedPin);
        }
        let roster = self.list().await?;
        let Some(member) = roster.iter().find(|member| member.pin == pin) else {
            warn!("Login rejected");
            return Err(StaffError::InvalidPin);
        };

        let session = StaffSession::start(member);
        self.sessions
            .save(&session)
            .await
            .map_err(|e| StaffError::Storage(e.to_string()))?;
        info!(staff_id = %member.id, role = %member.role, "Logged in");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StaffError> {
        self.sessions
            .clear()
            .await
            .map_err(|e| StaffError::Storage(e.to_string()))?;
        info!("Logged out");
        Ok(())
    }

    pub async fn current_session(&self) -> Option<StaffSession> {
        self.sessions.current().await
    }

    #[instrument(skip(self, current, new))]
    pub async fn change_pin(
        &self,
        id: StaffId,
        current: &str,
        new: &str,
    ) -> Result<(), StaffError> {
        debug!("Sending request");
        let action = StaffAction::ChangePin {
            current: current.to_string(),
            new: new.to_string(),
        };
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

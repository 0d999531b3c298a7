//! [`ActorEntity`] implementation for [`Reservation`].

use super::{ReservationAction, ReservationError};
use crate::model::{
    Reservation, ReservationId, ReservationRequest, ReservationUpdate, MAX_PARTY_SIZE,
    MIN_PARTY_SIZE,
};
use crate::validation::{normalize_phone, FieldErrors};
use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use kcb_framework::ActorEntity;

impl Reservation {
    /// Validates `request` against `today` and builds the booking.
    pub fn from_request(
        id: ReservationId,
        request: ReservationRequest,
        today: NaiveDate,
    ) -> Result<Self, ReservationError> {
        request.validate(today).map_err(ReservationError::Invalid)?;
        Ok(Self {
            id,
            confirmation: format!("KCB-R{:04}", id.0),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: normalize_phone(&request.phone),
            date: request.date,
            time: request.time,
            party_size: request.party_size,
            special_requests: request.special_requests.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ActorEntity for Reservation {
    type Id = ReservationId;
    type Create = ReservationRequest;
    type Update = ReservationUpdate;
    type Action = ReservationAction;
    type ActionResult = ();
    type Context = ();
    type Error = ReservationError;

    fn id(&self) -> &ReservationId {
        &self.id
    }

    fn from_create_params(id: ReservationId, params: ReservationRequest) -> Result<Self, Self::Error> {
        Self::from_request(id, params, Local::now().date_naive())
    }

    async fn on_update(
        &mut self,
        update: ReservationUpdate,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        if let Some(size) = update.party_size {
            if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&size) {
                let mut errors = FieldErrors::new();
                errors.add(
                    "party_size",
                    format!("Party size must be between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE}"),
                );
                return Err(ReservationError::Invalid(errors));
            }
            self.party_size = size;
        }
        if let Some(requests) = update.special_requests {
            self.special_requests = requests.trim().to_string();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ReservationAction,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

//! # Reservation Client

use crate::model::{Reservation, ReservationId, ReservationRequest, ReservationUpdate};
use crate::reservation_actor::ReservationError;
use async_trait::async_trait;
use chrono::Local;
use kcb_framework::{ActorClient, FrameworkError, ResourceClient};
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct ReservationClient {
    inner: ResourceClient<Reservation>,
    /// Simulated round trip to the booking backend.
    latency: Duration,
}

#[async_trait]
impl ActorClient<Reservation> for ReservationClient {
    type Error = ReservationError;

    fn inner(&self) -> &ResourceClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ReservationError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ReservationError::NotFound(id),
            Err(other) => ReservationError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ReservationClient {
    pub fn new(inner: ResourceClient<Reservation>, latency: Duration) -> Self {
        Self { inner, latency }
    }

    /// Validates and books the table; resolves once the booking is confirmed.
    /// Invalid forms are rejected before the simulated wait.
    #[instrument(skip(self, request), fields(party_size = request.party_size, date = %request.date))]
    pub async fn submit(&self, request: ReservationRequest) -> Result<Reservation, ReservationError> {
        request
            .validate(Local::now().date_naive())
            .map_err(ReservationError::Invalid)?;
        if !self.latency.is_zero() {
            debug!(latency_ms = self.latency.as_millis() as u64, "Submitting reservation");
            tokio::time::sleep(self.latency).await;
        }
        debug!("Sending request");
        let id = self.inner.create(request).await.map_err(Self::map_error)?;
        let reservation = self.reservation(id).await?;
        info!(confirmation = %reservation.confirmation, "Reservation confirmed");
        Ok(reservation)
    }

    #[instrument(skip(self))]
    pub async fn reservation(&self, id: ReservationId) -> Result<Reservation, ReservationError> {
        self.get(id)
            .await?
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn amend(
        &self,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> Result<Reservation, ReservationError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn cancel(&self, id: ReservationId) -> Result<(), ReservationError> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation_actor;
    use chrono::{Days, NaiveTime};

    fn request(name: &str) -> ReservationRequest {
        ReservationRequest {
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: "9876543210".to_string(),
            date: Local::now().date_naive() + Days::new(3),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            party_size: 4,
            special_requests: String::new(),
        }
    }

    fn client(latency: Duration) -> ReservationClient {
        let (actor, inner) = reservation_actor::new(8);
        tokio::spawn(actor.run(()));
        ReservationClient::new(inner, latency)
    }

    #[tokio::test]
    async fn test_desk_answers_while_a_booking_is_pending() {
        let client = client(Duration::from_millis(300));
        let pending = tokio::spawn({
            let client = client.clone();
            async move { client.submit(request("Anjali Desai")).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let lookup = client.reservation(ReservationId(1)).await;
        assert!(matches!(lookup, Err(ReservationError::NotFound(_))));
        assert!(!pending.is_finished());

        let booked = pending.await.unwrap().unwrap();
        assert_eq!(booked.confirmation, "KCB-R0001");
    }

    #[tokio::test]
    async fn test_concurrent_bookings_wait_together() {
        let client = client(Duration::from_millis(200));
        let started = tokio::time::Instant::now();
        let (first, second) = tokio::join!(
            client.submit(request("Kiran Rao")),
            client.submit(request("Farhan Ali")),
        );
        assert!(first.is_ok() && second.is_ok());
        assert!(started.elapsed() < Duration::from_millis(390));
    }

    #[tokio::test]
    async fn test_invalid_form_fails_without_booking() {
        let client = client(Duration::from_millis(200));
        let mut bad = request("Kiran Rao");
        bad.party_size = 0;
        assert!(matches!(
            client.submit(bad).await,
            Err(ReservationError::Invalid(_))
        ));
        assert!(client.list().await.unwrap().is_empty());
    }
}

//! Table reservations.

use crate::validation::FieldErrors;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const MIN_PARTY_SIZE: u8 = 1;
pub const MAX_PARTY_SIZE: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u32);

impl From<u32> for ReservationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reservation_{}", self.0)
    }
}

/// The reservation form as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u8,
    pub special_requests: String,
}

impl ReservationRequest {
    /// Checks every field; `today` is the first bookable date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.email("email", &self.email);
        errors.phone("phone", &self.phone);
        if self.date < today {
            errors.add("date", "Please choose a date from today onwards");
        }
        if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&self.party_size) {
            errors.add(
                "party_size",
                format!("Party size must be between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE}"),
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone)]
pub struct ReservationUpdate {
    pub party_size: Option<u8>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    /// Quoted back to the guest, e.g. `KCB-R0003`.
    pub confirmation: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u8,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReservationRequest {
        ReservationRequest {
            name: "Ananya Iyer".to_string(),
            email: "ananya@example.com".to_string(),
            phone: "9123456780".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 2, 14).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            party_size: 4,
            special_requests: String::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 2, 1).unwrap()
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate(today()).is_ok());
    }

    #[test]
    fn test_today_is_bookable_but_yesterday_is_not() {
        let mut req = request();
        req.date = today();
        assert!(req.validate(today()).is_ok());

        req.date = today().pred_opt().unwrap();
        let errors = req.validate(today()).unwrap_err();
        assert!(errors.contains("date"));
    }

    #[test]
    fn test_party_size_bounds() {
        let mut req = request();
        for size in [1, 20] {
            req.party_size = size;
            assert!(req.validate(today()).is_ok());
        }
        for size in [0, 21] {
            req.party_size = size;
            assert!(req.validate(today()).unwrap_err().contains("party_size"));
        }
    }

    #[test]
    fn test_reports_all_fields_together() {
        let req = ReservationRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            party_size: 0,
            ..request()
        };
        let errors = req.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get("phone"),
            Some("Please enter a valid 10-digit mobile number")
        );
    }
}

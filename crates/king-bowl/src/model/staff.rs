//! Staff roster and the logged-in session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for staff members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub u32);

impl From<u32> for StaffId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "staff_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Manager,
    Cashier,
    Chef,
    Waiter,
}

impl Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StaffRole::Manager => "Manager",
            StaffRole::Cashier => "Cashier",
            StaffRole::Chef => "Chef",
            StaffRole::Waiter => "Waiter",
        })
    }
}

/// A staff member. The PIN is stored and compared in plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub pin: String,
}

#[derive(Debug, Clone)]
pub struct StaffCreate {
    pub name: String,
    pub role: StaffRole,
    pub pin: String,
}

impl StaffCreate {
    pub fn new(name: impl Into<String>, role: StaffRole, pin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            pin: pin.into(),
        }
    }
}

/// Who is using the staff screens. Persisted under `kcb_staff_session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffSession {
    pub staff_id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub logged_in_at: DateTime<Utc>,
}

impl StaffSession {
    pub fn start(member: &StaffMember) -> Self {
        Self {
            staff_id: member.id,
            name: member.name.clone(),
            role: member.role,
            logged_in_at: Utc::now(),
        }
    }
}

//! Booking Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Booking lifecycle status
///
/// The only allowed transition is `Active -> Canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BookingStatus {
    #[default]
    Active,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Canceled => "Canceled",
        }
    }

    /// Whether a booking in `self` may move to `next`
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        !matches!((self, next), (Self::Canceled, Self::Active))
    }

    /// Strict parser for request bodies: unknown values are rejected.
    pub fn deserialize_strict<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Canceled" => Ok(Self::Canceled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Stored records are read leniently: `null`, a missing field or any value
/// other than `"Canceled"` means the booking is still active.
impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("Canceled") => Self::Canceled,
            _ => Self::Active,
        })
    }
}

/// Booking entity (旅行预订)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Store-assigned identifier
    #[serde(alias = "_id")]
    pub id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_age: Option<u32>,
    pub user_number: String,
    pub destination: String,
    pub travel_date: String,
    pub return_date: String,
    pub ticket_quantity: u32,
    pub total_price: f64,
    #[serde(default)]
    pub status: BookingStatus,
    /// Creation time (UTC millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Booking {
    pub fn is_canceled(&self) -> bool {
        self.status == BookingStatus::Canceled
    }

    /// Copy of this record with the status overwritten
    pub fn with_status(&self, status: BookingStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn travel_date_display(&self) -> String {
        crate::util::display_date(&self.travel_date)
    }

    pub fn return_date_display(&self) -> String {
        crate::util::display_date(&self.return_date)
    }
}

/// Create booking payload (`POST /register`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_age: Option<u32>,
    #[validate(length(min = 1))]
    pub user_number: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(length(min = 1))]
    pub travel_date: String,
    #[validate(length(min = 1))]
    pub return_date: String,
    #[validate(range(min = 1))]
    pub ticket_quantity: u32,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
}

/// Status update payload (`PATCH /bookings/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    #[serde(deserialize_with = "BookingStatus::deserialize_strict")]
    pub status: BookingStatus,
}

impl BookingStatusUpdate {
    pub fn canceled() -> Self {
        Self {
            status: BookingStatus::Canceled,
        }
    }
}

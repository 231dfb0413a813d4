//! Hotel Reservation Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hotel reservation (酒店预订)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelReservation {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_name: String,
    pub user_number: String,
    pub hotel_name: String,
    pub destination: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub room_quantity: u32,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Create hotel reservation payload (`POST /hotel`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HotelReservationCreate {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub user_number: String,
    #[validate(length(min = 1))]
    pub hotel_name: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(length(min = 1))]
    pub check_in_date: String,
    #[validate(length(min = 1))]
    pub check_out_date: String,
    #[validate(range(min = 1))]
    pub room_quantity: u32,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Режим проживания: посуточно или почасово
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayMode {
    #[default]
    Overnight,
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourlySlot {
    Morning,
    Afternoon,
    Evening,
}

impl HourlySlot {
    pub fn label(&self) -> &'static str {
        match self {
            HourlySlot::Morning => "06:00-12:00",
            HourlySlot::Afternoon => "12:00-18:00",
            HourlySlot::Evening => "18:00-24:00",
        }
    }
}

/// Бронирование в том виде, в каком оно уходит в POST /bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "hotelId")]
    pub hotel_id: RecordId,
    #[serde(rename = "hotelName")]
    pub hotel_name: String,
    #[serde(rename = "roomId")]
    pub room_id: RecordId,
    #[serde(rename = "roomName")]
    pub room_name: String,
    #[serde(rename = "roomPrice")]
    pub room_price: f64,
    #[serde(rename = "isHourly")]
    pub is_hourly: bool,
    #[serde(rename = "stayMode")]
    pub stay_mode: StayMode,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(rename = "hourlySlot", default, skip_serializing_if = "Option::is_none")]
    pub hourly_slot: Option<HourlySlot>,
    pub nights: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Запрос мобильного клиента на бронирование
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "hotelId")]
    pub hotel_id: RecordId,
    #[serde(rename = "roomId")]
    pub room_id: Option<RecordId>,
    #[serde(rename = "stayMode", default)]
    pub stay_mode: StayMode,
    #[serde(rename = "checkIn", default)]
    pub check_in: Option<NaiveDate>,
    #[serde(rename = "checkOut", default)]
    pub check_out: Option<NaiveDate>,
    #[serde(rename = "hourlySlot", default)]
    pub hourly_slot: Option<HourlySlot>,
}

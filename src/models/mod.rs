pub mod user;
pub mod hotel;
pub mod booking;

pub use user::{Credentials, Registration, Role, SessionUser, User};
pub use hotel::{Hotel, HotelDraft, HotelStatus, OperationRecord, Room, RoomDraft};
pub use booking::{Booking, BookingRequest, HourlySlot, StayMode};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::ValidationError;

/// Идентификатор записи в хранилище: число или строка, как пришло
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

// Пустой идентификатор для записей, пришедших без id
impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        // "12" из пути URL и 12 из JSON должны совпадать
        match id.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(id.to_string()),
        }
    }
}

/// `null` и отсутствующее поле превращаются в значение по умолчанию
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Числа из хранилища приходят как число, строка или null
fn loose_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// `4`, `"4"` и `null` читаются одинаково; все остальное дает 0
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(loose_number(&value).unwrap_or_default())
}

pub(crate) fn lenient_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(loose_number(&value)
        .filter(|n| (0.0..=f64::from(u8::MAX)).contains(n))
        .map_or(0, |n| n as u8))
}

// Обязательное текстовое поле формы
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Формат времени для createdAt и записей истории
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::{Validate, ValidationError};

use super::{lenient_f64, lenient_u8, not_blank, null_as_default, RecordId, TIMESTAMP_FORMAT};

/// Статус объявления отеля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelStatus {
    #[default]
    Pending,
    Published,
    Rejected,
    Offline,
}

impl HotelStatus {
    pub const ALL: [HotelStatus; 4] = [
        HotelStatus::Pending,
        HotelStatus::Published,
        HotelStatus::Rejected,
        HotelStatus::Offline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HotelStatus::Pending => "pending",
            HotelStatus::Published => "published",
            HotelStatus::Rejected => "rejected",
            HotelStatus::Offline => "offline",
        }
    }

    /// Подпись для консоли
    pub fn label(&self) -> &'static str {
        match self {
            HotelStatus::Pending => "待审核",
            HotelStatus::Published => "已发布",
            HotelStatus::Rejected => "已驳回",
            HotelStatus::Offline => "已下线",
        }
    }
}

impl fmt::Display for HotelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HotelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(HotelStatus::Pending),
            "published" => Ok(HotelStatus::Published),
            "rejected" => Ok(HotelStatus::Rejected),
            "offline" => Ok(HotelStatus::Offline),
            other => Err(format!("unknown hotel status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, alias = "type", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(rename = "isHourly", default, deserialize_with = "null_as_default")]
    pub is_hourly: bool,
}

/// Запись журнала операций; журнал только дополняется
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub time: String,
    pub operator: String,
    pub action: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_zh: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_u8")]
    pub star: u8,
    #[serde(rename = "basePrice", default, deserialize_with = "lenient_f64")]
    pub base_price: f64,
    #[serde(rename = "openDate", default, deserialize_with = "null_as_default")]
    pub open_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(rename = "mainImage", default, deserialize_with = "null_as_default")]
    pub main_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surroundings: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: HotelStatus,
    #[serde(rename = "rejectReason", default, deserialize_with = "null_as_default")]
    pub reject_reason: String,
    #[serde(rename = "createdBy", default, deserialize_with = "null_as_default")]
    pub created_by: String,
    #[serde(rename = "createdAt", default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(rename = "operationHistory", default, deserialize_with = "null_as_default")]
    pub operation_history: Vec<OperationRecord>,
}

impl Hotel {
    pub fn created_at_parsed(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT).ok()
    }

    pub fn has_hourly_room(&self) -> bool {
        self.rooms.iter().any(|r| r.is_hourly)
    }

    pub fn display_name(&self) -> &str {
        if self.name_zh.is_empty() {
            &self.name_en
        } else {
            &self.name_zh
        }
    }

    pub fn find_room(&self, room_id: &RecordId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == room_id)
    }
}

/// Тело формы добавления/редактирования отеля
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HotelDraft {
    #[validate(custom(function = "not_blank_string", message = "请输入中文名"))]
    pub name_zh: String,
    #[validate(custom(function = "not_blank_string", message = "请输入英文名"))]
    pub name_en: String,
    #[validate(custom(function = "not_blank_string", message = "请输入地址"))]
    pub address: String,
    #[serde(default = "default_star")]
    #[validate(range(min = 3, max = 5, message = "请选择星级"))]
    pub star: u8,
    #[serde(rename = "basePrice")]
    #[validate(required(message = "请输入价格"), range(min = 0.0, message = "请输入价格"))]
    pub base_price: Option<f64>,
    #[serde(rename = "openDate", default)]
    #[validate(custom(function = "valid_open_date", message = "开业时间格式应为 YYYY-MM-DD"))]
    pub open_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "mainImage", default)]
    pub main_image: String,
    #[serde(default)]
    pub surroundings: String,
    #[serde(default)]
    #[validate(nested)]
    pub rooms: Vec<RoomDraft>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomDraft {
    #[validate(custom(function = "not_blank_string", message = "房型名称"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "价格"))]
    pub price: f64,
    #[serde(rename = "isHourly", default)]
    pub is_hourly: bool,
}

fn default_star() -> u8 {
    3
}

fn not_blank_string(value: &String) -> Result<(), ValidationError> {
    not_blank(value)
}

fn valid_open_date(value: &String) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("open_date"))
}

impl HotelDraft {
    /// Номера комнат: epoch millis + индекс, как их выдает форма
    pub fn rooms_with_ids(&self, now_millis: i64) -> Vec<Room> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(index, room)| Room {
                id: RecordId::Int(now_millis + index as i64),
                name: room.name.trim().to_string(),
                price: room.price,
                is_hourly: room.is_hourly,
            })
            .collect()
    }

    pub fn tags_cleaned(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

//! booking.rs
//!
//! Правила карточки отеля и бронирования в мобильном клиенте: список номеров
//! для выбранного режима, даты заезда/выезда по умолчанию, количество ночей и
//! проверка заявки перед отправкой в POST /bookings.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Booking, BookingRequest, Hotel, HotelStatus, HourlySlot, Room, StayMode};

/// Номера для режима проживания, по возрастанию цены
pub fn rooms_for(hotel: &Hotel, mode: StayMode) -> Vec<Room> {
    let mut rooms: Vec<Room> = hotel
        .rooms
        .iter()
        .filter(|r| match mode {
            StayMode::Hourly => r.is_hourly,
            StayMode::Overnight => !r.is_hourly,
        })
        .cloned()
        .collect();
    rooms.sort_by(|a, b| a.price.total_cmp(&b.price));
    rooms
}

/// Количество полных суток между датами; 0, если интервал не положительный
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayDates {
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    pub nights: i64,
}

impl StayDates {
    /// Недостающие даты: сегодня→завтра для ночевки, сегодня→сегодня для почасового
    pub fn resolve(
        mode: StayMode,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let (check_in, check_out) = match (check_in, check_out) {
            (Some(i), Some(o)) => (i, o),
            _ => match mode {
                StayMode::Overnight => (today, today + Days::new(1)),
                StayMode::Hourly => (today, today),
            },
        };
        StayDates {
            check_in,
            check_out,
            nights: nights(check_in, check_out),
        }
    }
}

/// Параметры карточки отеля `?stayMode=&checkIn=&checkOut=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQuery {
    #[serde(rename = "stayMode")]
    pub stay_mode: Option<StayMode>,
    #[serde(rename = "checkIn")]
    pub check_in: Option<NaiveDate>,
    #[serde(rename = "checkOut")]
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotOption {
    pub value: HourlySlot,
    pub label: &'static str,
}

pub fn slot_options() -> Vec<SlotOption> {
    [HourlySlot::Morning, HourlySlot::Afternoon, HourlySlot::Evening]
        .into_iter()
        .map(|value| SlotOption { value, label: value.label() })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HotelDetail {
    pub hotel: Hotel,
    #[serde(rename = "stayMode")]
    pub stay_mode: StayMode,
    pub dates: StayDates,
    pub rooms: Vec<Room>,
    #[serde(rename = "hourlySlots", skip_serializing_if = "Vec::is_empty")]
    pub hourly_slots: Vec<SlotOption>,
}

pub fn detail(hotel: Hotel, query: &DetailQuery, today: NaiveDate) -> HotelDetail {
    let mode = query.stay_mode.unwrap_or_default();
    let rooms = rooms_for(&hotel, mode);
    HotelDetail {
        dates: StayDates::resolve(mode, query.check_in, query.check_out, today),
        stay_mode: mode,
        rooms,
        hourly_slots: if mode == StayMode::Hourly { slot_options() } else { Vec::new() },
        hotel,
    }
}

/// Проверяет заявку и собирает запись бронирования
pub fn prepare(
    hotel: &Hotel,
    request: &BookingRequest,
    today: NaiveDate,
    horizon_months: u32,
    created_at: String,
) -> Result<Booking, AppError> {
    if hotel.status != HotelStatus::Published {
        return Err(AppError::NotFound("酒店不存在或已下线".to_string()));
    }

    let room_id = request
        .room_id
        .as_ref()
        .ok_or_else(|| AppError::Validation("请选择房型".to_string()))?;
    let room = hotel
        .find_room(room_id)
        .ok_or_else(|| AppError::Validation("请选择房型".to_string()))?;

    let mode = request.stay_mode;
    if room.is_hourly != (mode == StayMode::Hourly) {
        return Err(AppError::Validation("所选房型不支持当前入住方式".to_string()));
    }

    let (check_in, check_out) = match (request.check_in, request.check_out) {
        (Some(i), Some(o)) => (i, o),
        _ => return Err(AppError::Validation("请先选择入住和离店日期".to_string())),
    };

    let last_day = today
        .checked_add_months(Months::new(horizon_months))
        .unwrap_or(NaiveDate::MAX);
    if check_in < today || check_in > last_day {
        return Err(AppError::Validation("入住日期超出可预订范围".to_string()));
    }

    let nights = nights(check_in, check_out);
    let hourly_slot = match mode {
        StayMode::Overnight => {
            if nights < 1 {
                return Err(AppError::Validation("过夜模式下，至少需要 1 晚".to_string()));
            }
            None
        }
        StayMode::Hourly => {
            if check_in != check_out {
                return Err(AppError::Validation("钟点房的入住和离店须为同一天".to_string()));
            }
            Some(
                request
                    .hourly_slot
                    .ok_or_else(|| AppError::Validation("请选择时段".to_string()))?,
            )
        }
    };

    Ok(Booking {
        id: None,
        hotel_id: hotel.id.clone(),
        hotel_name: hotel.display_name().to_string(),
        room_id: room.id.clone(),
        room_name: room.name.clone(),
        room_price: room.price,
        is_hourly: room.is_hourly,
        stay_mode: mode,
        check_in,
        check_out,
        hourly_slot,
        nights,
        created_at,
    })
}

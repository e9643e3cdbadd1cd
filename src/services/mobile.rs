use chrono::{Local, NaiveDate, Utc};
use tracing::info;

use crate::config::ConsoleConfig;
use crate::error::AppError;
use crate::models::{Booking, BookingRequest, Hotel, HotelStatus, RecordId};
use crate::services::booking::{self, DetailQuery, HotelDetail};
use crate::services::search::{self, SearchQuery, SearchResult};
use crate::store_client::StoreClient;

/// Поиск, карточка отеля и бронирование для мобильного клиента
#[derive(Clone)]
pub struct MobileService {
    store: StoreClient,
    console: ConsoleConfig,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl MobileService {
    pub fn new(store: StoreClient, console: ConsoleConfig) -> Self {
        Self { store, console }
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, AppError> {
        let filter = query.to_filter()?;
        let hotels = self.store.list_hotels().await?;
        Ok(search::search(
            &hotels,
            &filter,
            query.sort.unwrap_or_default(),
            query.page.unwrap_or(1),
            self.console.page_size,
        ))
    }

    // Неопубликованные отели для клиента не существуют
    async fn published(&self, id: &RecordId) -> Result<Hotel, AppError> {
        match self.store.get_hotel(id).await? {
            Some(hotel) if hotel.status == HotelStatus::Published => Ok(hotel),
            _ => Err(AppError::NotFound("酒店不存在或已下线".to_string())),
        }
    }

    pub async fn detail(&self, id: &RecordId, query: &DetailQuery) -> Result<HotelDetail, AppError> {
        let hotel = self.published(id).await?;
        Ok(booking::detail(hotel, query, today()))
    }

    pub async fn book(&self, request: &BookingRequest) -> Result<Booking, AppError> {
        let hotel = self.published(&request.hotel_id).await?;
        let booking = booking::prepare(
            &hotel,
            request,
            today(),
            self.console.booking_horizon_months,
            Utc::now().to_rfc3339(),
        )?;

        let saved = self.store.create_booking(&booking).await?;
        info!(
            "booking for hotel {} room {} ({} nights)",
            saved.hotel_id, saved.room_id, saved.nights
        );
        Ok(saved)
    }
}

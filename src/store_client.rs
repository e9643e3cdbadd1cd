//! store_client.rs
//!
//! HTTP-клиент к удаленному REST/JSON хранилищу. Хранилище владеет всеми
//! записями: отели (`/hotels`), пользователи (`/users`) и бронирования
//! (`/bookings`). Клиент не повторяет запросы и не кеширует ответы:
//! любая ошибка сети сразу возвращается вызывающему коду.

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::models::{Booking, Hotel, RecordId, User};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store response for {path} does not match the expected shape: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("store returned {status} for {method} {path}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Клиент для хранилища
#[derive(Clone)]
pub struct StoreClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl StoreClient {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("store {} {}", method, url);

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("store {} {} -> {}", method, path, status);
            return Err(StoreError::Status {
                method,
                path: path.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            warn!("store {} {}: undecodable body: {}", method, path, source);
            StoreError::Decode {
                path: path.to_string(),
                source,
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    // --- Отели ---

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        self.get("/hotels").await
    }

    /// `Ok(None)`, если хранилище ответило 404
    pub async fn get_hotel(&self, id: &RecordId) -> Result<Option<Hotel>, StoreError> {
        match self.get(&format!("/hotels/{}", id)).await {
            Ok(hotel) => Ok(Some(hotel)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Тело - произвольный JSON без `id`; идентификатор назначает хранилище
    pub async fn create_hotel<B: Serialize + ?Sized>(&self, hotel: &B) -> Result<Hotel, StoreError> {
        self.send(Method::POST, "/hotels", Some(hotel)).await
    }

    /// Частичное обновление: меняются только переданные поля
    pub async fn patch_hotel<B: Serialize + ?Sized>(
        &self,
        id: &RecordId,
        patch: &B,
    ) -> Result<Hotel, StoreError> {
        self.send(Method::PATCH, &format!("/hotels/{}", id), Some(patch)).await
    }

    // --- Пользователи ---

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.get("/users").await
    }

    pub async fn create_user(&self, user: &User) -> Result<User, StoreError> {
        self.send(Method::POST, "/users", Some(user)).await
    }

    // --- Бронирования ---

    pub async fn create_booking(&self, booking: &Booking) -> Result<Booking, StoreError> {
        self.send(Method::POST, "/bookings", Some(booking)).await
    }
}

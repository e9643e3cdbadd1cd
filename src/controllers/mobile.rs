use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{BookingRequest, RecordId};
use crate::services::booking::DetailQuery;
use crate::services::search::SearchQuery;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hotels", get(search_hotels))
        .route("/hotels/{id}", get(hotel_detail))
        .route("/bookings", post(create_booking))
}

// GET /api/hotels?city=&keyword=&minStar=&price=&tags=&stayMode=&sort=&page=
async fn search_hotels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.mobile.search(&query).await?;
    Ok(Json(result))
}

// GET /api/hotels/{id}?stayMode=&checkIn=&checkOut=
async fn hotel_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.mobile.detail(&RecordId::from(id.as_str()), &query).await?;
    Ok(Json(detail))
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.mobile.book(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "预订成功",
            "booking": booking,
        })),
    ))
}

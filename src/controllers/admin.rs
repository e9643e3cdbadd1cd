//! admin.rs
//!
//! Маршруты консоли администратора и продавца. Все маршруты требуют Basic Auth;
//! роль проверяется уже в сервисе.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::middleware::AuthContext;
use crate::models::{HotelDraft, RecordId};
use crate::services::dashboard::DashboardQuery;
use crate::services::workflow::AuditAction;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/hotels", get(dashboard).post(create_hotel))
        .route("/admin/hotels/{id}", get(hotel_detail).put(edit_hotel))
        .route("/admin/hotels/{id}/approve", post(approve))
        .route("/admin/hotels/{id}/reject", post(reject))
        .route("/admin/hotels/{id}/offline", post(offline))
        .route("/admin/hotels/{id}/online", post(online))
}

/* ---------- LIST & DETAIL ---------- */

// GET /api/admin/hotels
async fn dashboard(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let board = state.admin.dashboard(&ctx, &filter).await?;
    Ok(Json(board))
}

// GET /api/admin/hotels/{id}
async fn hotel_detail(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.admin.hotel(&ctx, &RecordId::from(id.as_str())).await?;
    Ok(Json(view))
}

/* ---------- MERCHANT ---------- */

// POST /api/admin/hotels
async fn create_hotel(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(draft): Json<HotelDraft>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.admin.create_hotel(&ctx, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "酒店提交成功，请等待管理员审核！",
            "hotel": hotel,
        })),
    ))
}

// PUT /api/admin/hotels/{id}
async fn edit_hotel(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(draft): Json<HotelDraft>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state
        .admin
        .edit_hotel(&ctx, &RecordId::from(id.as_str()), &draft)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "修改已提交，请等待管理员重新审核",
        "hotel": hotel,
    })))
}

/* ---------- MODERATION ---------- */

#[derive(Debug, Default, Deserialize)]
struct AuditRequest {
    reason: Option<String>,
}

async fn audit(
    state: &AppState,
    ctx: &AuthContext,
    id: String,
    action: AuditAction,
    body: Option<Json<AuditRequest>>,
    message: &'static str,
) -> Result<Json<serde_json::Value>, AppError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let hotel = state
        .admin
        .transition(ctx, &RecordId::from(id.as_str()), action, request.reason.as_deref())
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": message,
        "hotel": hotel,
    })))
}

// POST /api/admin/hotels/{id}/approve
async fn approve(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    body: Option<Json<AuditRequest>>,
) -> Result<impl IntoResponse, AppError> {
    audit(&state, &ctx, id, AuditAction::Approve, body, "审核通过").await
}

// POST /api/admin/hotels/{id}/reject  {"reason": "..."}
async fn reject(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    body: Option<Json<AuditRequest>>,
) -> Result<impl IntoResponse, AppError> {
    audit(&state, &ctx, id, AuditAction::Reject, body, "已驳回").await
}

// POST /api/admin/hotels/{id}/offline
async fn offline(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    body: Option<Json<AuditRequest>>,
) -> Result<impl IntoResponse, AppError> {
    audit(&state, &ctx, id, AuditAction::Offline, body, "已下线").await
}

// POST /api/admin/hotels/{id}/online
async fn online(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    body: Option<Json<AuditRequest>>,
) -> Result<impl IntoResponse, AppError> {
    audit(&state, &ctx, id, AuditAction::Online, body, "已上线").await
}

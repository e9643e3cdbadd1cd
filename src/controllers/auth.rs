use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Credentials, Registration};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts.login(&credentials).await?;
    Ok(Json(json!({
        "success": true,
        "message": "登录成功！",
        "user": user,
    })))
}

// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts.register(registration).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "注册成功！请登录",
            "user": user,
        })),
    ))
}

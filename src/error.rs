use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::models::HotelStatus;
use crate::store_client::StoreError;

/// Ошибки консоли. Текст ошибки - это то, что клиент покажет во всплывающем сообщении
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("用户名或密码错误")]
    InvalidCredentials,

    #[error("您未登录，请先登录")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("当前状态（{}）不允许执行“{action}”", .from.label())]
    InvalidTransition {
        from: HotelStatus,
        action: &'static str,
    },

    #[error("网络错误")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = first_message(&errors).unwrap_or_else(|| "表单校验失败".to_string());
        AppError::Validation(message)
    }
}

// Первое сообщение об ошибке в детерминированном порядке полей
fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<(&Cow<'static, str>, &ValidationErrorsKind)> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (_, kind) in fields {
        let found = match kind {
            ValidationErrorsKind::Field(list) => list
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string())),
            ValidationErrorsKind::Struct(inner) => first_message(inner),
            ValidationErrorsKind::List(items) => items.values().find_map(|inner| first_message(inner)),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Store(e) => tracing::error!("store request failed: {}", e),
            other => tracing::debug!("request rejected ({}): {}", status, other),
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

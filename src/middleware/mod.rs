use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Hotel, Role, SessionUser};

/// Кто выполняет операцию. Передается явно в каждую операцию консоли
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            return Ok(());
        }
        let message = match role {
            Role::Admin => "仅管理员可执行该操作",
            Role::Merchant => "仅商户可执行该操作",
        };
        Err(AppError::Forbidden(message.to_string()))
    }

    /// Администратор видит всё, продавец - только свои отели
    pub fn can_view(&self, hotel: &Hotel) -> bool {
        self.role == Role::Admin || hotel.created_by == self.username
    }
}

impl From<SessionUser> for AuthContext {
    fn from(user: SessionUser) -> Self {
        Self {
            username: user.username,
            role: user.role,
        }
    }
}

// Разбирает заголовок "Basic base64(username:password)"
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    let mut parts = credentials.splitn(2, ':');
    let username = parts.next()?.to_string();
    let password = parts.next()?.to_string();
    Some((username, password))
}

// Basic Auth extractor: учетные данные сверяются с коллекцией /users
impl FromRequestParts<Arc<crate::AppState>> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let (username, password) = parse_basic(header_value).ok_or(AppError::Unauthenticated)?;

        let user = state.accounts.authenticate(&username, &password).await?;
        Ok(user.into())
    }
}

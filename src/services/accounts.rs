use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Credentials, Registration, SessionUser};
use crate::store_client::StoreClient;

/// Вход и регистрация по коллекции /users
#[derive(Clone)]
pub struct AccountService {
    store: StoreClient,
}

impl AccountService {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Сравнение пароля - простое равенство строк
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionUser, AppError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let users = self.store.list_users().await?;
        users
            .iter()
            .find(|u| u.username == username && u.verify_password(password))
            .map(|u| u.session())
            .ok_or(AppError::InvalidCredentials)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, AppError> {
        credentials.validate()?;
        let (username, password) = credentials.trimmed();
        let user = self.authenticate(username, password).await?;
        info!("user {} logged in as {}", user.username, user.role.as_str());
        Ok(user)
    }

    pub async fn register(&self, registration: Registration) -> Result<SessionUser, AppError> {
        registration.validate()?;
        let user = registration.into_user();

        let users = self.store.list_users().await?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("该用户名已被注册！".to_string()));
        }

        let created = self.store.create_user(&user).await?;
        info!("registered {} {}", created.role.as_str(), created.username);
        Ok(created.session())
    }
}

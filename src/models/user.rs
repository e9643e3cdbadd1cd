use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{not_blank, null_as_default, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Merchant,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Merchant => "merchant",
            Role::Admin => "admin",
        }
    }
}

/// Запись из коллекции /users. Пароль хранится как есть
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
}

impl User {
    // Проверить пароль (простое сравнение строк)
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn session(&self) -> SessionUser {
        SessionUser {
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Пользователь сессии без пароля
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "not_blank_credential", message = "请输入用户名和密码"))]
    pub username: String,
    #[validate(custom(function = "not_blank_credential", message = "请输入用户名和密码"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[validate(custom(function = "not_blank_credential", message = "请输入用户名和密码"))]
    pub username: String,
    #[validate(custom(function = "not_blank_credential", message = "请输入用户名和密码"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

fn not_blank_credential(value: &String) -> Result<(), ValidationError> {
    not_blank(value)
}

impl Credentials {
    pub fn trimmed(&self) -> (&str, &str) {
        (self.username.trim(), self.password.trim())
    }
}

impl Registration {
    pub fn into_user(self) -> User {
        User {
            id: None,
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
            role: self.role,
        }
    }
}

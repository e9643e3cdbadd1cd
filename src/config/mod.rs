use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub console: ConsoleConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    /// `json` включает структурированный вывод логов
    pub log_format: String,
}

// Настройки удаленного REST-хранилища (/hotels, /users, /bookings)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Параметры консоли и мобильного клиента
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Размер страницы в списке отелей мобильного клиента
    pub page_size: usize,
    /// Насколько вперед (в месяцах) можно бронировать
    pub booking_horizon_months: u32,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_cors: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            booking_horizon_months: 6,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "hotel_console=debug,tower_http=debug".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            store: StoreConfig {
                base_url: env::var("STORE_URL")
                    .unwrap_or_else(|_| "http://localhost:3001".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout_seconds: env::var("STORE_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("STORE_TIMEOUT_SECONDS must be a valid number"),
            },
            console: ConsoleConfig {
                page_size: env::var("PAGE_SIZE")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("PAGE_SIZE must be a valid number"),
                booking_horizon_months: env::var("BOOKING_HORIZON_MONTHS")
                    .unwrap_or_else(|_| "6".to_string())
                    .parse()
                    .expect("BOOKING_HORIZON_MONTHS must be a valid number"),
            },
            features: FeatureFlags {
                enable_cors: env::var("ENABLE_CORS")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_CORS must be true or false"),
            },
        }
    }

    /// Конфигурация для тестов и локального запуска против заданного хранилища
    pub fn for_store(base_url: &str) -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "hotel_console=debug".to_string(),
                log_format: "pretty".to_string(),
            },
            store: StoreConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_seconds: 5,
            },
            console: ConsoleConfig::default(),
            features: FeatureFlags { enable_cors: false },
        }
    }
}

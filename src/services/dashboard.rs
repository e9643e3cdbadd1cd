//! dashboard.rs
//!
//! Панель администратора: список отелей в зоне видимости пользователя,
//! фильтры таблицы, статистика по статусам и доступные действия для каждой строки.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::AuthContext;
use crate::models::{Hotel, HotelStatus, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Edit,
    Approve,
    Reject,
    Offline,
    Online,
}

/// Какие кнопки доступны пользователю для отеля в данном статусе
pub fn allowed_actions(role: Role, status: HotelStatus) -> Vec<RowAction> {
    match (role, status) {
        (Role::Merchant, HotelStatus::Pending | HotelStatus::Rejected | HotelStatus::Published) => {
            vec![RowAction::Edit]
        }
        (Role::Merchant, HotelStatus::Offline) => vec![],
        (Role::Admin, HotelStatus::Pending) => vec![RowAction::Approve, RowAction::Reject],
        (Role::Admin, HotelStatus::Published) => vec![RowAction::Offline],
        (Role::Admin, HotelStatus::Offline) => vec![RowAction::Online],
        (Role::Admin, HotelStatus::Rejected) => vec![],
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub search: Option<String>,
    pub status: Option<HotelStatus>,
    pub star: Option<u8>,
    pub creator: Option<String>,
}

impl DashboardFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        let search_ok = match self.search.as_deref() {
            Some(text) => hotel.name_zh.to_lowercase().contains(&text.to_lowercase()),
            None => true,
        };
        search_ok
            && self.status.map_or(true, |s| hotel.status == s)
            && self.star.map_or(true, |s| hotel.star == s)
            && self.creator.as_deref().map_or(true, |c| hotel.created_by == c)
    }
}

/// `?search=&status=all&star=all&creator=all`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub star: Option<String>,
    pub creator: Option<String>,
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// "all" и пустая строка означают отсутствие фильтра; к поиску по имени не относится
fn selected(value: &Option<String>) -> Option<&str> {
    trimmed(value).filter(|v| *v != "all")
}

impl DashboardQuery {
    pub fn to_filter(&self) -> Result<DashboardFilter, AppError> {
        let status = selected(&self.status)
            .map(|s| s.parse::<HotelStatus>().map_err(AppError::Validation))
            .transpose()?;
        let star = selected(&self.star)
            .map(|s| {
                s.parse::<u8>()
                    .map_err(|_| AppError::Validation(format!("无效的星级: {}", s)))
            })
            .transpose()?;

        Ok(DashboardFilter {
            search: trimmed(&self.search).map(str::to_string),
            status,
            star,
            creator: selected(&self.creator).map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusStats {
    pub total: usize,
    pub pending: usize,
    pub published: usize,
    pub rejected: usize,
    pub offline: usize,
}

impl StatusStats {
    pub fn count(hotels: &[Hotel]) -> Self {
        let mut stats = StatusStats {
            total: hotels.len(),
            ..Default::default()
        };
        for hotel in hotels {
            match hotel.status {
                HotelStatus::Pending => stats.pending += 1,
                HotelStatus::Published => stats.published += 1,
                HotelStatus::Rejected => stats.rejected += 1,
                HotelStatus::Offline => stats.offline += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardRow {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(rename = "statusLabel")]
    pub status_label: &'static str,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub viewer: String,
    pub role: Role,
    pub stats: StatusStats,
    pub creators: Vec<String>,
    pub hotels: Vec<DashboardRow>,
}

/// Продавец видит только свои отели; свежие сверху
pub fn scope(ctx: &AuthContext, hotels: Vec<Hotel>) -> Vec<Hotel> {
    let mut visible: Vec<Hotel> = hotels
        .into_iter()
        .filter(|h| ctx.role == Role::Admin || h.created_by == ctx.username)
        .collect();
    // Без даты создания - в конец списка
    visible.sort_by(|a, b| b.created_at_parsed().cmp(&a.created_at_parsed()));
    visible
}

pub fn creators(hotels: &[Hotel]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for hotel in hotels {
        if !seen.contains(&hotel.created_by) {
            seen.push(hotel.created_by.clone());
        }
    }
    seen
}

pub fn build(ctx: &AuthContext, hotels: Vec<Hotel>, filter: &DashboardFilter) -> Dashboard {
    let scoped = scope(ctx, hotels);
    let stats = StatusStats::count(&scoped);
    let creators = creators(&scoped);

    let rows = scoped
        .into_iter()
        .filter(|h| filter.matches(h))
        .map(|hotel| DashboardRow {
            status_label: hotel.status.label(),
            actions: allowed_actions(ctx.role, hotel.status),
            hotel,
        })
        .collect();

    Dashboard {
        viewer: ctx.username.clone(),
        role: ctx.role,
        stats,
        creators,
        hotels: rows,
    }
}

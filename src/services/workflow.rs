//! workflow.rs
//!
//! Жизненный цикл объявления отеля:
//!
//! ```text
//! pending ──approve──▶ published ──offline──▶ offline
//!    │                    ▲                      │
//!    └──reject──▶ rejected │◀───────online───────┘
//!                    │
//!   (merchant edit) resubmit ──▶ pending
//! ```
//!
//! Каждый переход дописывает одну запись в `operationHistory`. Журнал
//! только растет: записи не переупорядочиваются и не удаляются.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Hotel, HotelStatus, OperationRecord, Role, TIMESTAMP_FORMAT};

/// Значение `detail`, когда причина не указана
pub const NO_DETAIL: &str = "无";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Approve,
    Reject,
    Offline,
    Online,
    /// Повторная подача после правки продавцом
    Resubmit,
}

impl AuditAction {
    /// Текст действия в журнале операций
    pub fn history_text(&self) -> &'static str {
        match self {
            AuditAction::Approve => "审核通过",
            AuditAction::Reject => "驳回申请",
            AuditAction::Offline => "强制下线",
            AuditAction::Online => "重新上线",
            AuditAction::Resubmit => "提交修改",
        }
    }

    pub fn target(&self) -> HotelStatus {
        match self {
            AuditAction::Approve | AuditAction::Online => HotelStatus::Published,
            AuditAction::Reject => HotelStatus::Rejected,
            AuditAction::Offline => HotelStatus::Offline,
            AuditAction::Resubmit => HotelStatus::Pending,
        }
    }

    pub fn allowed_from(&self, from: HotelStatus) -> bool {
        use HotelStatus::*;
        match self {
            AuditAction::Approve | AuditAction::Reject => from == Pending,
            AuditAction::Offline => from == Published,
            AuditAction::Online => from == Offline,
            AuditAction::Resubmit => matches!(from, Pending | Rejected | Published),
        }
    }

    pub fn required_role(&self) -> Role {
        match self {
            AuditAction::Resubmit => Role::Merchant,
            _ => Role::Admin,
        }
    }

    pub fn requires_reason(&self) -> bool {
        matches!(self, AuditAction::Reject)
    }
}

/// Результат перехода, готовый к применению
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub status: HotelStatus,
    pub reject_reason: String,
    pub entry: OperationRecord,
}

/// Тело PATCH /hotels/{id} для смены статуса
#[derive(Debug, Serialize)]
pub struct StatusPatch<'a> {
    pub status: HotelStatus,
    #[serde(rename = "rejectReason")]
    pub reject_reason: &'a str,
    #[serde(rename = "operationHistory")]
    pub operation_history: &'a [OperationRecord],
}

/// Причина отказа обязательна; проверяется до любых обращений к хранилищу
pub fn check_reason(action: AuditAction, reason: Option<&str>) -> Result<(), AppError> {
    let blank = reason.map(str::trim).unwrap_or_default().is_empty();
    if action.requires_reason() && blank {
        return Err(AppError::Validation("请输入驳回理由".to_string()));
    }
    Ok(())
}

pub fn plan(
    current: HotelStatus,
    action: AuditAction,
    operator: &str,
    reason: Option<&str>,
    now: NaiveDateTime,
) -> Result<Transition, AppError> {
    check_reason(action, reason)?;

    if !action.allowed_from(current) {
        return Err(AppError::InvalidTransition {
            from: current,
            action: action.history_text(),
        });
    }

    let reason = reason.map(str::trim).unwrap_or_default();
    // Правка продавцом всегда очищает причину отказа
    let reject_reason = match action {
        AuditAction::Resubmit => String::new(),
        _ => reason.to_string(),
    };

    Ok(Transition {
        status: action.target(),
        reject_reason,
        entry: OperationRecord {
            time: now.format(TIMESTAMP_FORMAT).to_string(),
            operator: operator.to_string(),
            action: action.history_text().to_string(),
            detail: if reason.is_empty() { NO_DETAIL.to_string() } else { reason.to_string() },
        },
    })
}

pub fn apply(hotel: &mut Hotel, transition: Transition) {
    hotel.status = transition.status;
    hotel.reject_reason = transition.reject_reason;
    hotel.operation_history.push(transition.entry);
}

impl<'a> StatusPatch<'a> {
    pub fn from_hotel(hotel: &'a Hotel) -> Self {
        Self {
            status: hotel.status,
            reject_reason: &hotel.reject_reason,
            operation_history: &hotel.operation_history,
        }
    }
}

//! admin.rs
//!
//! Операции консоли: панель, карточка отеля, подача и правка объявления
//! продавцом, модерация администратором. Каждая операция получает
//! `AuthContext` явно и обращается к хранилищу напрямую.

use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthContext;
use crate::models::{
    Hotel, HotelDraft, HotelStatus, OperationRecord, RecordId, Role, Room, TIMESTAMP_FORMAT,
};
use crate::services::dashboard::{self, Dashboard, DashboardFilter, RowAction};
use crate::services::workflow::{self, AuditAction, StatusPatch};
use crate::store_client::StoreClient;

/// Запись отеля для POST /hotels и PATCH /hotels/{id} при правке
#[derive(Debug, Serialize)]
struct HotelRecord<'a> {
    name_zh: &'a str,
    name_en: &'a str,
    address: &'a str,
    star: u8,
    #[serde(rename = "basePrice")]
    base_price: f64,
    #[serde(rename = "openDate")]
    open_date: &'a str,
    tags: Vec<String>,
    #[serde(rename = "mainImage")]
    main_image: &'a str,
    surroundings: &'a str,
    rooms: Vec<Room>,
    status: HotelStatus,
    #[serde(rename = "rejectReason")]
    reject_reason: &'a str,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
    #[serde(rename = "createdAt")]
    created_at: &'a str,
    #[serde(rename = "operationHistory")]
    operation_history: &'a [OperationRecord],
}

impl<'a> HotelRecord<'a> {
    fn from_draft(draft: &'a HotelDraft, status: HotelStatus, created_at: &'a str, history: &'a [OperationRecord]) -> Self {
        Self {
            name_zh: draft.name_zh.trim(),
            name_en: draft.name_en.trim(),
            address: draft.address.trim(),
            star: draft.star,
            base_price: draft.base_price.unwrap_or_default(),
            open_date: draft.open_date.as_deref().unwrap_or_default(),
            tags: draft.tags_cleaned(),
            main_image: draft.main_image.trim(),
            surroundings: draft.surroundings.trim(),
            rooms: draft.rooms_with_ids(Utc::now().timestamp_millis()),
            status,
            reject_reason: "",
            created_by: None,
            created_at,
            operation_history: history,
        }
    }
}

/// Карточка отеля в консоли
#[derive(Debug, Clone, Serialize)]
pub struct HotelView {
    pub hotel: Hotel,
    #[serde(rename = "statusLabel")]
    pub status_label: &'static str,
    pub actions: Vec<RowAction>,
}

#[derive(Clone)]
pub struct AdminService {
    store: StoreClient,
}

fn now_stamp() -> String {
    Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string()
}

impl AdminService {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    pub async fn dashboard(&self, ctx: &AuthContext, filter: &DashboardFilter) -> Result<Dashboard, AppError> {
        let hotels = self.store.list_hotels().await?;
        Ok(dashboard::build(ctx, hotels, filter))
    }

    async fn load(&self, id: &RecordId) -> Result<Hotel, AppError> {
        self.store
            .get_hotel(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("酒店 {} 不存在", id)))
    }

    async fn load_visible(&self, ctx: &AuthContext, id: &RecordId) -> Result<Hotel, AppError> {
        let hotel = self.load(id).await?;
        if !ctx.can_view(&hotel) {
            return Err(AppError::Forbidden("只能操作自己创建的酒店".to_string()));
        }
        Ok(hotel)
    }

    pub async fn hotel(&self, ctx: &AuthContext, id: &RecordId) -> Result<HotelView, AppError> {
        let hotel = self.load_visible(ctx, id).await?;
        Ok(HotelView {
            status_label: hotel.status.label(),
            actions: dashboard::allowed_actions(ctx.role, hotel.status),
            hotel,
        })
    }

    /// Новый отель всегда уходит на модерацию
    pub async fn create_hotel(&self, ctx: &AuthContext, draft: &HotelDraft) -> Result<Hotel, AppError> {
        ctx.require(Role::Merchant)?;
        draft.validate()?;

        let created_at = now_stamp();
        let mut record = HotelRecord::from_draft(draft, HotelStatus::Pending, &created_at, &[]);
        record.created_by = Some(ctx.username.as_str());

        let hotel = self.store.create_hotel(&record).await?;
        info!("hotel {} submitted by {}", hotel.id, ctx.username);
        Ok(hotel)
    }

    /// Правка продавцом: статус снова pending, причина отказа очищается
    pub async fn edit_hotel(&self, ctx: &AuthContext, id: &RecordId, draft: &HotelDraft) -> Result<Hotel, AppError> {
        ctx.require(AuditAction::Resubmit.required_role())?;
        draft.validate()?;

        let mut current = self.load_visible(ctx, id).await?;
        let transition = workflow::plan(
            current.status,
            AuditAction::Resubmit,
            &ctx.username,
            None,
            Local::now().naive_local(),
        )?;
        workflow::apply(&mut current, transition);

        let created_at = if current.created_at.is_empty() {
            now_stamp()
        } else {
            current.created_at.clone()
        };
        let record = HotelRecord::from_draft(draft, current.status, &created_at, &current.operation_history);

        let hotel = self.store.patch_hotel(id, &record).await?;
        info!("hotel {} resubmitted by {}", id, ctx.username);
        Ok(hotel)
    }

    /// Модерация. История перечитывается прямо перед дописыванием;
    /// конкурентные правки не обнаруживаются, побеждает последняя запись
    pub async fn transition(
        &self,
        ctx: &AuthContext,
        id: &RecordId,
        action: AuditAction,
        reason: Option<&str>,
    ) -> Result<Hotel, AppError> {
        ctx.require(action.required_role())?;
        workflow::check_reason(action, reason)?;

        let mut fresh = self.load_visible(ctx, id).await?;
        let transition = workflow::plan(
            fresh.status,
            action,
            &ctx.username,
            reason,
            Local::now().naive_local(),
        )
        .inspect_err(|e| warn!("hotel {}: {}", id, e))?;
        workflow::apply(&mut fresh, transition);

        let updated = self
            .store
            .patch_hotel(id, &StatusPatch::from_hotel(&fresh))
            .await?;
        info!(
            "hotel {} -> {} by {} ({})",
            id,
            updated.status,
            ctx.username,
            action.history_text()
        );
        Ok(updated)
    }
}

pub mod auth;
#[cfg(feature = "admin")]
pub mod admin;
#[cfg(feature = "mobile")]
pub mod mobile;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    let router = Router::new().merge(auth::routes());

    #[cfg(feature = "admin")]
    let router = router.merge(admin::routes());

    #[cfg(feature = "mobile")]
    let router = router.merge(mobile::routes());

    router
}

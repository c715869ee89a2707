//! Record routes - one set per resource kind
//!
//! - GET  /dashboard/{kind}/:id  edit page
//! - POST /dashboard/{kind}/:id  form action (intent=update|delete)
//! - GET  /api/{kind}/:id        record document (JSON)

pub mod api;
pub mod page;

pub use api::{api_record_detail, record_action};
pub use page::page_record_edit;

use crate::AppState;
use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;
use finboard_core::{RecordEndpoint, ResourceKind};

/// Routes for one resource kind
pub fn record_routes<K>() -> Router<AppState>
where
    K: ResourceKind,
    RecordEndpoint<K>: FromRef<AppState>,
{
    Router::new()
        .route(
            &K::record_path(":id"),
            get(page_record_edit::<K>).post(record_action::<K>),
        )
        .route(&K::api_path(":id"), get(api_record_detail::<K>))
}

pub mod health;
pub mod page;
pub mod search;

use crate::services::controller::QueryController;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type Controller = Arc<QueryController>;

pub fn router(controller: Controller) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/status", get(health::health_check))
        .route("/options", get(search::options))
        .route("/query/state", get(search::get_state))
        .route("/query/text", put(search::set_text))
        .route("/query/limit", put(search::set_limit))
        .route("/query/field", put(search::set_field))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(controller)
}

use crate::models::query::{LimitOption, SearchField, UiState};
use crate::models::responses::{
    ErrorResponse, FieldUpdate, LimitUpdate, OptionsResponse, TextUpdate,
};
use crate::routes::Controller;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, info};

type Rejection = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl ToString) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse::offered())
}

pub async fn get_state(State(controller): State<Controller>) -> Json<UiState> {
    Json(controller.state())
}

/// Validation failures are part of the page state, so this always answers 200.
pub async fn set_text(
    State(controller): State<Controller>,
    Json(update): Json<TextUpdate>,
) -> Json<UiState> {
    if let Err(e) = controller.set_search_text(update.text) {
        debug!("Search text rejected: {}", e);
    }
    Json(controller.state())
}

pub async fn set_limit(
    State(controller): State<Controller>,
    Json(update): Json<LimitUpdate>,
) -> Result<Json<UiState>, Rejection> {
    let limit = LimitOption::try_from(update.limit).map_err(bad_request)?;
    info!("Limit set to {}", limit);
    controller.set_limit(limit);
    Ok(Json(controller.state()))
}

pub async fn set_field(
    State(controller): State<Controller>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<UiState>, Rejection> {
    let field: SearchField = update.field.parse().map_err(bad_request)?;
    info!("Search field set to {}", field.label());
    controller.set_field(field);
    Ok(Json(controller.state()))
}

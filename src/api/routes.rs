use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::Result;
use crate::api::models::{ProcessRequest, ProcessResponse, ScheduleResponse};
use crate::scraper::fetch_article;
use crate::transform::{dispatch, TransformRequest};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .route("/get_schedule", get(schedule_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn process_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>> {
    let Json(req) = payload.inspect_err(|rejection| warn!(error = %rejection, "malformed request body"))?;
    let start_time = std::time::Instant::now();
    let result = process_request(&state, &req).await;

    match &result {
        Ok(_) => info!(action = req.action_name(), elapsed = ?start_time.elapsed(), "request processed"),
        Err(err) => warn!(action = req.action_name(), error = %err, "request failed"),
    }
    result.map(|result| Json(ProcessResponse { result }))
}

async fn process_request(state: &AppState, req: &ProcessRequest) -> Result<String> {
    let action = req.action()?;

    let text = match req.url_source() {
        Some(url) => fetch_article(url).await,
        None => req.text().to_string(),
    };

    let request = TransformRequest {
        text,
        mode: req.mode(),
        action,
        include_global: req.include_global(),
    };
    dispatch(state.provider.as_ref(), &request).await
}

async fn schedule_handler(State(state): State<AppState>) -> Result<Json<ScheduleResponse>> {
    let schedule = state.schedule.get_or_generate(state.provider.as_ref()).await?;
    Ok(Json(ScheduleResponse { schedule }))
}

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use toponym_core::gazetteer::GazetteerSource;
use toponym_core::suggest::suggest_from_source;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    location_name: Option<String>,
}

#[derive(Serialize, JsonSchema)]
pub struct SuggestResults {
    suggestions: Vec<String>,
}

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(json!({ "message": message })))
}

pub async fn suggest_handler(
    Extension(source): Extension<Arc<GazetteerSource>>,
    body: Bytes,
) -> Result<Json<SuggestResults>, ErrorResponse> {
    let start_time = Instant::now();
    let params: SuggestParams = serde_json::from_slice(&body).map_err(|err| {
        warn!("Rejected request body: {err}");
        error_response(StatusCode::BAD_REQUEST, "Invalid JSON")
    })?;
    let suggestions = tokio::task::spawn_blocking(move || {
        suggest_from_source(params.location_name.as_deref(), &source)
    })
    .await
    .map_err(|err| {
        error!("Suggestion task failed: {err}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Suggestion task failed")
    })?
    .map_err(|err| {
        error!("{err}");
        error_response(StatusCode::SERVICE_UNAVAILABLE, &err.to_string())
    })?;
    info!(
        "{} suggestions in {:.2?}",
        suggestions.len(),
        start_time.elapsed()
    );
    Ok(Json(SuggestResults { suggestions }))
}

pub async fn suggest_schema_handler() -> Json<RootSchema> {
    Json(schema_for!(SuggestResults))
}

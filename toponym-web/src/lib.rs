pub mod suggest_handler;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{AddExtensionLayer, Router};
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_log::LogTracer;

use toponym_core::gazetteer::GazetteerSource;

use crate::suggest_handler::{suggest_handler, suggest_schema_handler};

/// Register a subscriber as global default to process span data.
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

pub fn init_logging(log_level: tracing::Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_max_level(LevelFilter::from_level(log_level))
        .finish();
    init_subscriber(subscriber);
}

/// Routes answering suggestion requests against the gazetteer behind `source`.
pub fn app(source: GazetteerSource) -> Router {
    Router::new()
        .route("/find_location_suggestions", post(suggest_handler))
        .route(
            "/find_location_suggestions/schema",
            get(suggest_schema_handler),
        )
        .layer(AddExtensionLayer::new(Arc::new(source)))
        .layer(TraceLayer::new_for_http())
}

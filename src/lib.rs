pub mod config;
pub mod email;
pub mod error;
pub mod report;
pub mod routes;
pub mod state;
pub mod submission;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::ReportMailer;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    // A configured-but-broken SMTP block disables dispatch instead of
    // failing startup; the report download always works.
    let mailer = config.smtp.as_ref().and_then(|smtp| {
        match ReportMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP dispatch configured, reports go to {}", smtp.to);
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("SMTP dispatch not available: {e}");
                None
            }
        }
    });

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState { config, mailer });

    Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

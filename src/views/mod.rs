pub mod intake;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(intake::form_page))
        .route("/submit", post(intake::submit))
}

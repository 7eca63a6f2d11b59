use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

mod health;
mod records;
mod reports;
mod submit;

pub fn router() -> Router<AppState> {
    let v1 = Router::new()
        .route("/assessments", post(submit::submit))
        .route("/records/:id", get(records::get_record))
        .route("/reports/:id", get(reports::get_report));

    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/v1", v1)
}

use axum::Json;

use crate::dto::responses::Health;

pub async fn healthz() -> Json<Health> {
    Json(Health { ok: true })
}

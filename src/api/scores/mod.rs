mod handlers;

use axum::{routing::post, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:exam_id/scores", post(handlers::record_scores).get(handlers::list_scores))
}

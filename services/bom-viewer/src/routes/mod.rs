use axum::{routing::post, Router};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new().nest("/bom", bom_routes())
}

fn bom_routes() -> Router<AppState> {
    Router::new()
        .route("/render", post(render_bom))
        .route("/summary", post(summarize_bom))
        .route("/columns", post(bom_columns))
}

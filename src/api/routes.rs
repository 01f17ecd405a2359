use axum::{
    routing::get,
    Router,
    extract::State,
    response::{IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::response;
use crate::AppState;

pub const WELCOME_TEXT: &str = "Welcome to Satellite Scraper App";

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/scrape", get(scrape_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn root_handler() -> &'static str {
    WELCOME_TEXT
}

async fn scrape_handler(State(state): State<AppState>) -> Response {
    let start_time = std::time::Instant::now();

    match state.runner.run_scrape().await {
        Ok(data) => {
            info!(
                "Scrape finished in {:?}: {} items",
                start_time.elapsed(),
                data.as_array().map_or_else(|| "n/a".to_string(), |rows| rows.len().to_string())
            );
            response::success(data).into_response()
        }
        Err(err) => {
            error!("Error during scrape: {}", err);
            err.into_response()
        }
    }
}

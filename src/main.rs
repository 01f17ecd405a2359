use tokio::net::TcpListener;
use tracing::info;
use satellite_scraper::{
    config::Config,
    api::routes::create_router,
    build_runner, init_tracing,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let app_state = AppState::new(build_runner(&config.source));
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    info!("Satellite Scraper App listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod routes;
pub mod shared;

use routes::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = infrastructure::http::fetcher::build_fetch_client()?;
    let cache = infrastructure::cache::disk::DiskCache::at_system_temp();
    let app = routes::router(AppState { client, cache });

    let addr =
        std::env::var("SKIN_API_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

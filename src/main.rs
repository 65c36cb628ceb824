use league_web::{router, ApiClient, AppState, DEFAULT_API_BASE};
use reqwest::Url;
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let base = env::var("LEAGUE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let base = Url::parse(&base)?;
    let api = ApiClient::new(base)?;
    info!("league API base: {}", api.base());

    let app = router(AppState::new(api));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use mock_server::Scenario;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let scenario = match std::env::var("OFFERS_FIXTURE") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let envelope = serde_json::from_str(&raw).map_err(std::io::Error::other)?;
            tracing::info!(%path, "serving fixture");
            Scenario::Envelope(envelope)
        }
        Err(_) => Scenario::default(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run_with(listener, scenario).await
}

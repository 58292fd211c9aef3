use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use productlens::config::AppConfig;
use productlens::db;
use productlens::services::catalog::shopify::ShopifyCatalog;
use productlens::services::vision::classifier::ClassifierProvider;
use productlens::services::vision::ollama::OllamaVisionProvider;
use productlens::services::vision::VisionProvider;
use productlens::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let vision: Box<dyn VisionProvider> = match config.vision_provider.as_str() {
        "ollama" => {
            tracing::info!(
                "using Ollama vision provider (url: {}, model: {})",
                config.ollama_url,
                config.ollama_model
            );
            Box::new(OllamaVisionProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        _ => {
            anyhow::ensure!(
                !config.vision_api_url.is_empty(),
                "VISION_API_URL must be set when VISION_PROVIDER=classifier"
            );
            tracing::info!("using classifier vision provider (url: {})", config.vision_api_url);
            Box::new(ClassifierProvider::new(
                config.vision_api_url.clone(),
                config.vision_api_key.clone(),
            ))
        }
    };

    if config.shopify_shop_domain.is_empty() {
        tracing::warn!("SHOPIFY_SHOP_DOMAIN not set, draft creation disabled");
    }
    let catalog = ShopifyCatalog::new(
        config.shopify_shop_domain.clone(),
        config.shopify_access_token.clone(),
        config.shopify_api_version.clone(),
    );

    let (events_tx, _) = broadcast::channel(256);

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        vision,
        catalog: Box::new(catalog),
        events_tx,
    });

    let app = productlens::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

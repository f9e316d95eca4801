use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardscan::api::{create_router, AppState};
use cardscan::config::Config;
use cardscan::intelligence::CardStructurer;
use cardscan::llm::LlmProvider;
use cardscan::ocr::OcrProvider;

#[derive(Parser)]
#[command(name = "cardscan")]
#[command(about = "Business card OCR service")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides CARDSCAN_HOST)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    tracing::info!("Initializing OCR provider: {}...", config.ocr.model);
    let ocr = OcrProvider::new(&config.ocr)?;
    if ocr.is_available() {
        tracing::info!(engine = ocr.engine_name(), languages = %config.ocr.languages, "OCR ready");
    } else {
        tracing::warn!("OCR unavailable - every OCR request will fail with 500");
    }

    let structured_ocr =
        OcrProvider::new(&config.ocr.with_languages(&config.ocr.structured_languages))?;
    if structured_ocr.is_available() {
        tracing::info!(
            engine = structured_ocr.engine_name(),
            languages = %config.ocr.structured_languages,
            "Upload OCR ready"
        );
    } else {
        tracing::warn!("Upload OCR unavailable - /upload-ocr will fail with 500");
    }

    let llm = LlmProvider::new(&config.llm);
    if llm.is_available() {
        tracing::info!(model = %config.llm.model, "LLM structuring enabled");
    } else {
        tracing::warn!(backend = ?llm.backend(), "LLM unavailable - /upload-ocr falls back to regex");
    }

    if config.run_mode.exposes_stack() {
        tracing::warn!("Development mode: error responses include debug details");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ocr)
        .with_structured_ocr(structured_ocr)
        .with_structurer(CardStructurer::new(llm));
    let app = create_router(state);

    tracing::info!("OCR API starting on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /              (health check)");
    tracing::info!("  POST /ocr           (multipart or JSON)");
    tracing::info!("  POST /ocr-multipart (multipart only)");
    tracing::info!("  POST /ocr-json      (JSON only)");
    tracing::info!("  POST /upload-ocr    (multipart, LLM structured)");
    tracing::info!("  GET  /docs          (API docs)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cardscan=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}

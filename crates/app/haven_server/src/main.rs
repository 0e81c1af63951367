//! Haven API server binary.
//!
//! Wires the assistant client, the chat relay, and the document store into
//! the HTTP router, then serves until Ctrl-C / SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use haven_api::config::ApiConfig;
use haven_core::assistant::openai::{DEFAULT_BASE_URL, OpenAiAssistant, OpenAiConfig};
use haven_core::relay::{ChatRelay, PollPolicy};
use haven_core::rooms;
use haven_core::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "haven_server", about = "Haven API server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// API key for the assistant service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Assistant that handles chat runs.
    #[arg(long, env = "ASSISTANT_ID")]
    assistant_id: String,

    /// Assistant API root.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    openai_base_url: String,

    /// Timeout for each request to the assistant service.
    #[arg(long, env = "OPENAI_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Delay between run status checks.
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Status checks before a run is reported as timed out.
    #[arg(long, env = "POLL_MAX_ATTEMPTS", default_value_t = 60)]
    poll_max_attempts: u32,

    /// Browser origin allowed to call the API.
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    allowed_origin: String,

    /// PostgreSQL connection URL. Without it, documents live in memory.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// JSON room availability snapshot to load at startup.
    #[arg(long, env = "ROOMS_FILE")]
    rooms_file: Option<PathBuf>,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,haven_api=debug,haven_core=debug"))?,
        )
        .init();

    let args = Args::parse();

    info!(host = %args.host, port = args.port, "starting haven_server");

    let assistant = OpenAiAssistant::new(OpenAiConfig {
        api_key: args.openai_api_key,
        assistant_id: args.assistant_id,
        base_url: args.openai_base_url,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    })?;

    let policy = PollPolicy::new(
        Duration::from_millis(args.poll_interval_ms),
        args.poll_max_attempts,
    );
    info!(
        max_attempts = policy.max_attempts,
        budget_secs = policy.budget().as_secs_f64(),
        "configured run polling"
    );
    let relay = ChatRelay::new(Arc::new(assistant), policy);

    let store: Arc<dyn DocumentStore> = match &args.database_url {
        Some(url) => {
            info!(max_connections = args.max_connections, "using PostgreSQL document store");
            Arc::new(PgDocumentStore::connect(url, args.max_connections).await?)
        }
        None => {
            warn!("DATABASE_URL not set, documents are kept in memory only");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    if let Some(path) = &args.rooms_file {
        rooms::seed_from_file(store.as_ref(), path).await?;
    }

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        allowed_origin: args.allowed_origin,
    };

    let state = haven_api::AppState {
        relay,
        store,
        config: config.clone(),
    };

    let app = haven_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");

    Ok(())
}

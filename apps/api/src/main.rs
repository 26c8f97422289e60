mod accounts;
mod chat;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod skills;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::accounts::tokens::TokenService;
use crate::chat::agent::{ChatAgent, LlmChatAgent};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::notifier::LogNotifier;
use crate::matching::queue::NotificationQueue;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{JobBoardStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSetu API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn JobBoardStore> = Arc::new(PgStore::connect(&config.database_url).await?);

    let (notifications, _dispatcher) = NotificationQueue::spawn(
        store.clone(),
        Arc::new(LogNotifier),
        config.notify_queue_capacity,
        config.notify_workers,
        Duration::from_secs(config.notify_timeout_secs),
    );
    info!(
        "Notification queue started (capacity {}, workers {}, delivery timeout {}s)",
        config.notify_queue_capacity, config.notify_workers, config.notify_timeout_secs
    );

    let chat_agent: Option<Arc<dyn ChatAgent>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("Chat agent initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmChatAgent(llm)) as Arc<dyn ChatAgent>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; /chat/ is disabled");
            None
        }
    };

    let state = AppState {
        store,
        tokens: TokenService::new(&config.jwt_secret, config.access_token_expire_minutes),
        notifications,
        chat_agent,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins to the React frontend host
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rag_chat::api::{create_router, AppState};
use rag_chat::application::{
    ChatService, ContextAssembler, DocumentService, RagService, ResponseGenerator,
};
use rag_chat::domain::ports::SessionStore;
use rag_chat::infrastructure::{config::AppConfig, embedding, llm, vector_index};
use rag_chat::infrastructure::InMemorySessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,rag_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let app_config = Arc::new(AppConfig::load()?);
    let config = &app_config.config;

    // The embedder must come up before anything can be indexed; an
    // unusable embedder is a startup failure, not a degraded mode.
    let embedder = embedding::from_config(&config.embedding)?;
    info!(
        provider = %config.embedding.provider,
        dimension = embedder.dimension(),
        "Embedding service initialized"
    );

    let index = vector_index::from_config(&config.vector_index, embedder.dimension()).await?;
    info!(backend = %config.vector_index.backend, "Vector index initialized");

    // Model backend failure is recorded, not fatal: the generator falls
    // back to deterministic replies.
    let generator = match llm::resolve(&config.llm) {
        Ok(backend) => {
            info!(provider = %config.llm.provider, model = %config.llm.model, "Model backend ready");
            Arc::new(ResponseGenerator::ready(backend, app_config.prompts.clone()))
        }
        Err(e) => {
            warn!(error = %e, "Model backend unavailable, responses will degrade");
            Arc::new(ResponseGenerator::unavailable(
                e.to_string(),
                app_config.prompts.clone(),
            ))
        }
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let rag = Arc::new(RagService::new(embedder, index, config.rag.top_k));
    let documents = Arc::new(DocumentService::new(
        store.clone(),
        rag.clone(),
        config.rag.chunk_size,
        config.rag.chunk_overlap,
    ));
    let chat = Arc::new(ChatService::new(
        rag.clone(),
        store.clone(),
        ContextAssembler::new(app_config.prompts.clone()),
        generator.clone(),
        config.rag.history_limit,
    ));

    let state = AppState::new(
        app_config.clone(),
        store,
        chat,
        documents,
        rag,
        generator,
    );
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

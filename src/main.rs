use anyhow::Context;
use ragdoc::{
    AppState, DocumentLoader, PdfLoader, RagdocConfig, TextChunker,
    api::routes::create_router,
    cli::{Cli, Commands, output::Output},
};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    // Missing .env is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let config = RagdocConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_tracing(&config.server.log_level, cli.json_logs);

    match cli.command {
        None | Some(Commands::Serve) => serve(config, output).await,
        Some(Commands::Ask {
            document,
            top_k,
            question,
        }) => ask(config, &document, top_k, &question, output).await,
        Some(Commands::Chunk { file, show_text }) => chunk(config, &file, show_text, output).await,
    }
}

fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ragdoc={level},ragdoc_server={level},tower_http={level}",
            level = default_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: RagdocConfig, output: &Output) -> anyhow::Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::from_config(config).context("Failed to initialize providers")?;
    tracing::info!(
        embedding_model = %state.config.embedding.model,
        chat_model = %state.config.chat.model,
        chunk_size = state.config.rag.chunk_size,
        chunk_overlap = state.config.rag.chunk_overlap,
        top_k = state.config.rag.top_k,
        "Providers configured"
    );

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.banner();
    output.server_running(&host, port);
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn ask(
    mut config: RagdocConfig,
    document: &Path,
    top_k: Option<usize>,
    question: &str,
    output: &Output,
) -> anyhow::Result<()> {
    if let Some(k) = top_k {
        anyhow::ensure!(k > 0, "--top-k must be greater than 0");
        config.rag.top_k = k;
    }
    anyhow::ensure!(!question.trim().is_empty(), "Question must not be empty");

    let state = AppState::from_config(config).context("Failed to initialize providers")?;
    let source = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.display().to_string());

    output.info(&format!("Ingesting {}", source));
    let index = state
        .store
        .replace_with(|| state.pipeline.ingest(document, &source))
        .await?;
    output.success(&format!("Indexed {} chunks", index.chunk_count()));

    let answer = state.answerer.answer(&state.store, question.trim()).await?;
    output.answer(&answer);
    Ok(())
}

async fn chunk(
    config: RagdocConfig,
    file: &Path,
    show_text: bool,
    output: &Output,
) -> anyhow::Result<()> {
    let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
    let pages = PdfLoader.load(file).await?;
    let chunks = chunker.chunk_pages(&pages);

    output.header(&file.display().to_string());
    output.kv("pages", &pages.len().to_string());
    output.kv("chunks", &chunks.len().to_string());
    output.kv(
        "chunk size / overlap",
        &format!("{} / {}", chunker.chunk_size(), chunker.chunk_overlap()),
    );

    if let (Some(min), Some(max)) = (
        chunks.iter().map(|c| c.char_len()).min(),
        chunks.iter().map(|c| c.char_len()).max(),
    ) {
        let total: usize = chunks.iter().map(|c| c.char_len()).sum();
        output.kv("chars min / avg / max", &format!(
            "{} / {} / {}",
            min,
            total / chunks.len(),
            max
        ));
    }

    output.header("Chunks");
    for c in &chunks {
        output.chunk(c, show_text);
    }
    Ok(())
}

//! Analysis server binary
//!
//! Run with: cargo run -p textlens --bin textlens-server

use textlens::{config::AppConfig, server::AnalyzerServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textlens=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        textlens                           ║
║     Document Ingestion & Lexical Analysis Service         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = AppConfig::load_or_default();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Data dir: {}", config.storage.data_dir.display());
    tracing::info!("  - Store chunk size: {}", config.chunking.store_chunk_size);
    tracing::info!("  - Store chunk overlap: {}", config.chunking.store_chunk_overlap);
    tracing::info!("  - Stats top_k: {}", config.analysis.top_k);

    // Create and start server (loads the segmentation dictionary)
    let server = AnalyzerServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload     - Upload documents");
    println!("  POST /api/analyze    - Re-analyze a stored document");
    println!("  GET  /api/search     - Substring search");
    println!("  GET  /api/documents  - List documents");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use voxnote::{
    AppState, CaptureSession, Config, FileStore, MicRecorder, OpenAiClient, RecordingStore,
};

#[derive(Debug, Parser)]
#[command(name = "voxnote", about = "Voice note service: record, transcribe, enrich")]
struct Args {
    /// Config file (without extension)
    #[arg(long, default_value = "config/voxnote")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let kv = Arc::new(FileStore::new(&cfg.storage.data_dir)?);
    let store = Arc::new(RecordingStore::new(kv));

    let api = Arc::new(OpenAiClient::new(cfg.openai.clone())?);

    let recorder = MicRecorder::new(&cfg.capture.recordings_dir)?;
    let capture = CaptureSession::new(Box::new(recorder));

    let state = AppState::new(store, api, capture);
    let router = voxnote::create_router(state);

    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", cfg.service.http.bind, port);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

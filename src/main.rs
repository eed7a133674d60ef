use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use board_core::Database;
use board_service::models::UpdateBoardRequest;
use board_service::storage::LocalObjectStorage;
use board_service::{AppError, AttachmentCleaner, BoardService, Config};

#[derive(Parser)]
#[command(name = "boardctl")]
#[command(about = "Update boards and reconcile their attachments and participants")]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding attachment objects
    #[arg(long, global = true)]
    storage_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Migrate,
    /// Print a board as JSON
    Show { board_id: Uuid },
    /// Apply an update request (JSON) to a board
    Update {
        board_id: Uuid,

        /// Request file; stdin when omitted
        #[arg(short, long)]
        request: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.database, cli.storage_root);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db = Database::open(&config.database_path)?;
    db.migrate()?;

    match cli.command {
        Commands::Migrate => {
            tracing::info!(path = %config.database_path.display(), "database migrated");
        }
        Commands::Show { board_id } => {
            let (service, cleaner) = build_service(db, &config);
            let board = service.get_board(board_id).await.map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&board)?);
            drop(service);
            cleaner.await?;
        }
        Commands::Update { board_id, request } => {
            let req = read_request(request).await?;
            let (service, cleaner) = build_service(db, &config);
            let result = service.update_board(board_id, req).await;

            // Let scheduled deletions finish before the runtime shuts down.
            drop(service);
            cleaner.await?;

            let board = result.map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
    }

    Ok(())
}

fn build_service(db: Database, config: &Config) -> (BoardService, tokio::task::JoinHandle<()>) {
    let storage = Arc::new(LocalObjectStorage::new(&config.storage_root));
    let (cleaner, handle) = AttachmentCleaner::spawn(storage, Arc::new(db.clone()));
    (BoardService::from_database(db, cleaner), handle)
}

async fn read_request(path: Option<PathBuf>) -> anyhow::Result<UpdateBoardRequest> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };
    serde_json::from_str(&raw).context("invalid update request")
}

fn report(err: AppError) -> anyhow::Error {
    match err.detail() {
        Some(detail) => anyhow::anyhow!("{}: {} ({})", err.code().as_str(), err, detail),
        None => anyhow::anyhow!("{}: {}", err.code().as_str(), err),
    }
}

//! cleng - Main Entry Point
//!
//! Merges extraction documents and explores their node trees.

use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cleng::api::{self, AppState};
use cleng::index::{display_field, NodeTypeIndexer};
use cleng::loader::load_value;
use cleng::merge::merge_files;
use cleng::types::{nodes_from_value, ClengConfig};
use cleng::{DocumentMerger, Workspace};

#[derive(Debug, Parser)]
#[command(name = "cleng", version, about = "Merge and explore C/C++ extraction documents.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Concatenate the configured fields of every input document
    Merge {
        /// Extraction documents, merged in the order given
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Field to merge (repeatable; defaults to macros, functions, enums)
        #[arg(short, long = "field", value_name = "NAME")]
        fields: Vec<String>,
    },
    /// Group the nodes of one document by type tag
    Index {
        /// Document to index
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the nodes of this type instead of per-type counts
        #[arg(short = 't', long = "type", value_name = "TAG")]
        node_type: Option<String>,

        /// Print only this field of each node of the selected type
        #[arg(short, long, value_name = "NAME", requires = "node_type")]
        field: Option<String>,
    },
    /// Serve named documents over HTTP for ad hoc inspection
    Explore {
        /// Directory holding the `<name>.json` files
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Document name to preload (repeatable)
        #[arg(short, long = "resource", value_name = "NAME")]
        resources: Vec<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries documents.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cleng=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ClengConfig::from_env();

    let cli = Cli::parse();
    match cli.command {
        Command::Merge { files, fields } => run_merge(config.with_merge_fields(fields), &files),
        Command::Index {
            file,
            node_type,
            field,
        } => run_index(&file, node_type.as_deref(), field.as_deref()),
        Command::Explore {
            dir,
            resources,
            port,
        } => {
            let mut config = config.with_resources(resources);
            if let Some(dir) = dir {
                config.resource_dir = dir;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_explore(config).await
        }
    }
}

fn run_merge(config: ClengConfig, files: &[PathBuf]) -> Result<()> {
    let merger = DocumentMerger::new(config.merge_fields);
    let (output, _report) = merge_files(files, &merger)?;
    write_stdout(&output)
}

fn run_index(file: &Path, node_type: Option<&str>, field: Option<&str>) -> Result<()> {
    let value = load_value(file)?;
    let roots = nodes_from_value(&file.display().to_string(), &value)?;
    let index = NodeTypeIndexer::index(&roots)?;

    info!(
        file = %file.display(),
        tags = index.len(),
        nodes = index.total_nodes(),
        "Indexed document"
    );

    let output = match (node_type, field) {
        (None, _) => serde_json::to_string_pretty(&index.counts())?,
        (Some(tag), None) => serde_json::to_string_pretty(index.get(tag))?,
        (Some(tag), Some(field)) => index
            .project(tag, field)
            .iter()
            .map(|value| display_field(value.as_ref()))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    write_stdout(&output)
}

async fn run_explore(config: ClengConfig) -> Result<()> {
    info!("Starting cleng explorer v{}", env!("CARGO_PKG_VERSION"));

    let workspace = Workspace::load(&config.resource_dir, config.resources.as_slice())
        .with_context(|| {
            format!(
                "Failed to load documents {:?} from {}",
                config.resources,
                config.resource_dir.display()
            )
        })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = api::router(Arc::new(AppState { workspace, config }));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn write_stdout(output: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if !output.is_empty() {
        writeln!(handle, "{output}")?;
    }
    handle.flush()?;
    Ok(())
}

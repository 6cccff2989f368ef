//! # cache-client CLI
//!
//! Command-line access to the Cache service:
//!
//! - `set`: store a value from an argument, a file or stdin
//! - `get`: write a stored value to stdout or a file
//!
//! The service address comes from `--addr`, a `--config` JSON file or the
//! `CACHE_ADDR` environment variable, in that order of precedence.

mod telemetry;

use anyhow::Context;
use cache_client::{CacheKey, Client, ClientConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Store and retrieve values in the Cache service", long_about = None)]
struct Cli {
    /// Base address of the Cache service (e.g. http://localhost:8080)
    #[arg(long, global = true)]
    addr: Option<String>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(short, long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a value
    Set(SetArgs),

    /// Retrieve a value
    Get(GetArgs),
}

#[derive(Args, Debug)]
struct EntryArgs {
    /// Entry key
    #[arg(required = true)]
    key: String,

    /// Entry namespace
    #[arg(short, long)]
    namespace: String,

    /// Entry scope
    #[arg(short, long)]
    scope: String,
}

impl EntryArgs {
    fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.key, &self.namespace, &self.scope)
    }
}

#[derive(Args, Debug)]
struct SetArgs {
    #[command(flatten)]
    entry: EntryArgs,

    /// Value to store; read from stdin when neither this nor --file is given
    #[arg(conflicts_with = "file")]
    value: Option<String>,

    /// Read the value from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GetArgs {
    #[command(flatten)]
    entry: EntryArgs,

    /// Write the value to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClientConfig::from_env()?,
    };

    if let Some(addr) = &cli.addr {
        config.base_url = addr.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }

    Ok(config)
}

#[instrument(skip(client))]
async fn set(client: &Client, args: SetArgs) -> anyhow::Result<ExitCode> {
    let value = match (args.value, &args.file) {
        (Some(value), _) => value.into_bytes(),
        (None, Some(path)) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            buf
        }
    };

    client.set(&args.entry.cache_key(), value).await?;
    Ok(ExitCode::SUCCESS)
}

#[instrument(skip(client))]
async fn get(client: &Client, args: GetArgs) -> anyhow::Result<ExitCode> {
    let key = args.entry.cache_key();
    let value = match client.get(&key).await {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            eprintln!("not found: {}", key);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    match &args.output {
        Some(path) => tokio::fs::write(path, &value)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&value).await?;
            stdout.flush().await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = telemetry::init_tracing_subscriber()?;

    let config = load_config(&cli)?;
    let client = Client::from_config(&config);

    match cli.command {
        Commands::Set(args) => set(&client, args).await,
        Commands::Get(args) => get(&client, args).await,
    }
}

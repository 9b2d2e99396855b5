//! Agora daemon — entry point for running the voting platform server.

use agora_auth::SessionIssuer;
use agora_crypto::{address_of, sign_personal, signing_key_from_hex};
use agora_governance::{ProposalEngine, RandomOracle, VoteLedger};
use agora_rpc::{AppState, RpcServer, ServerConfig};
use agora_store_mem::MemStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "agora-daemon", about = "Agora voting platform daemon")]
struct Cli {
    /// Port for the HTTP server.
    #[arg(long, env = "AGORA_LISTEN_PORT")]
    port: Option<u16>,

    /// HMAC secret for session credentials (required to serve).
    #[arg(long, env = "AGORA_SESSION_SECRET")]
    session_secret: Option<String>,

    /// Session credential lifetime in minutes.
    #[arg(long, env = "AGORA_TOKEN_DURATION_MINS")]
    token_duration_mins: Option<u64>,

    /// Default voting window in seconds for proposals without one.
    #[arg(long, env = "AGORA_PROPOSAL_DURATION_SECS")]
    proposal_duration_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "AGORA_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "AGORA_LOG_FORMAT")]
    log_format: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,

    /// Sign a message with a wallet key (the client side of login).
    Sign {
        /// Message to sign, usually a nonce from `/auth/request-nonce`.
        message: String,

        /// Hex-encoded secp256k1 private key.
        #[arg(long, env = "AGORA_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
}

fn load_config(cli: &Cli) -> ServerConfig {
    let file_config: Option<ServerConfig> = if let Some(ref config_path) = cli.config {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<ServerConfig>(&contents) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {}", config_path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}, using CLI defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    ServerConfig {
        listen_port: cli.port.unwrap_or(base.listen_port),
        session_secret: cli
            .session_secret
            .clone()
            .unwrap_or(base.session_secret),
        token_duration_mins: cli.token_duration_mins.unwrap_or(base.token_duration_mins),
        default_proposal_duration_secs: cli
            .proposal_duration_secs
            .unwrap_or(base.default_proposal_duration_secs),
        log_format: cli.log_format.clone(),
        log_level: cli.log_level.clone(),
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = Arc::new(MemStore::new());
    let sessions = SessionIssuer::new(
        &config.session_secret,
        config.token_duration_secs(),
        store.clone(),
    )?;
    let engine = ProposalEngine::new(store.clone());
    let ledger = VoteLedger::new(store.clone(), store, Arc::new(RandomOracle));

    let state = AppState::new(
        Arc::new(sessions),
        Arc::new(engine),
        Arc::new(ledger),
        config.default_proposal_duration_secs,
    );

    tracing::info!(
        "Starting Agora server (port: {}, session lifetime: {}m)",
        config.listen_port,
        config.token_duration_mins,
    );
    RpcServer::new(config, state).start().await?;

    tracing::info!("Agora daemon exited cleanly");
    Ok(())
}

fn sign(message: &str, private_key: &str) -> anyhow::Result<()> {
    let key = signing_key_from_hex(private_key)?;
    let signature = sign_personal(message, &key)?;

    println!("wallet_address: {}", address_of(&key));
    println!("signed_message: {message}");
    println!("signature: {}", hex::encode(signature));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    agora_utils::init_tracing_with(&cli.log_level, &cli.log_format);

    match cli.command {
        Command::Serve => {
            let config = load_config(&cli);
            serve(config).await
        }
        Command::Sign {
            ref message,
            ref private_key,
        } => sign(message, private_key),
    }
}

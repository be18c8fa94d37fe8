//! CLI wallet for the S Chain network.

use anyhow::Result;
use cli::config::{default_wallet_path, WalletConfig};
use cli::{menu, RpcClient, Terminal};
use schain_core::KeyStore;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the CLI wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "schain-wallet", about = "S Chain wallet")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the wallet file
    #[structopt(short, long, parse(from_os_str))]
    wallet: Option<PathBuf>,

    /// RPC base URL of the node to connect to
    #[structopt(short, long)]
    node: Option<String>,

    /// Subcommand to run; without one the interactive menu starts
    #[structopt(subcommand)]
    cmd: Option<Command>,
}

/// Subcommands for the CLI wallet.
#[derive(Debug, StructOpt)]
enum Command {
    /// Create a new wallet
    #[structopt(name = "create")]
    Create,

    /// Show the address of the stored wallet
    #[structopt(name = "address")]
    Address,

    /// Print the private key of the stored wallet
    #[structopt(name = "export-key")]
    ExportKey,

    /// Get the balance of the wallet
    #[structopt(name = "balance")]
    Balance,

    /// Send tokens to another account
    #[structopt(name = "transfer")]
    Transfer {
        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount to send, in tokens (up to 6 decimal places)
        #[structopt(long)]
        amount: String,
    },

    /// Request test tokens
    #[structopt(name = "airdrop")]
    Airdrop,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => WalletConfig::from_file(path)?,
        None => WalletConfig::default(),
    };
    config.apply_env();

    // Override node if specified
    if let Some(node) = opt.node {
        config.rpc_url = node;
    }
    debug!("Using configuration {:?}", config);

    let store = KeyStore::new(opt.wallet.unwrap_or_else(default_wallet_path));
    let rpc = RpcClient::new(&config)?;
    let mut console = Terminal::new();

    // Run the appropriate command
    let ok = match opt.cmd {
        None => {
            menu::run(&mut console, &store, &rpc).await?;
            true
        }
        Some(Command::Create) => menu::create_wallet(&mut console, &store),
        Some(Command::Address) => menu::show_address(&mut console, &store),
        Some(Command::ExportKey) => menu::export_key(&mut console, &store),
        Some(Command::Balance) => menu::show_balance(&mut console, &store, &rpc).await,
        Some(Command::Transfer { to, amount }) => {
            menu::transfer_to(&mut console, &store, &rpc, &to, &amount).await
        }
        Some(Command::Airdrop) => menu::request_airdrop(&mut console, &store, &rpc).await,
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

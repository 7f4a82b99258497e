//! ethq node command line.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

mod cli;

use cli::RunCmd;
use ec_chain::{ChainQuery, MemoryChain};
use ec_gateway_server::start_server;
use ec_graphql::SchemaBinding;
use ep_utils::service::ServiceContext;

fn main() -> anyhow::Result<()> {
    let run_cmd = RunCmd::parse();
    setup_logging()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(run_cmd.blocking_threads)
        .build()
        .context("Building the tokio runtime")?;
    runtime.block_on(run(run_cmd))
}

async fn run(run_cmd: RunCmd) -> anyhow::Result<()> {
    tracing::info!("🧪 ethq node");
    tracing::info!("✌️  Version {}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&run_cmd.base_path)
        .with_context(|| format!("Creating base path {}", run_cmd.base_path.display()))?;

    let chain: Arc<dyn ChainQuery> = Arc::new(MemoryChain::devnet(run_cmd.dev_blocks));
    tracing::info!("⛓  Dev chain ready at height {}", chain.head_block_number());
    let schema = Arc::new(SchemaBinding::new(chain));

    let ctx = ServiceContext::new();
    ctx.cancel_on_ctrl_c();

    start_server(schema, run_cmd.gateway_params.as_gateway_config(), ctx.child())
        .await
        .context("Running the gateway server")
}

fn setup_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Setting up logging: {e}"))
}

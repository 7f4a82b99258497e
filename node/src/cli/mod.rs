pub mod gateway;

pub use gateway::*;

use std::path::PathBuf;

/// ethq: GraphQL query gateway over an Ethereum-style dev chain.
#[derive(Clone, Debug, clap::Parser)]
pub struct RunCmd {
    /// Directory where node data is kept.
    #[arg(env = "ETHQ_BASE_PATH", long, value_name = "PATH", default_value = "./.ethq")]
    pub base_path: PathBuf,

    /// Size of the blocking thread pool that executes queries.
    #[arg(env = "ETHQ_BLOCKING_THREADS", long, default_value_t = 8)]
    pub blocking_threads: usize,

    /// Height of the deterministic dev chain built at startup.
    #[arg(env = "ETHQ_DEV_BLOCKS", long, default_value_t = 10)]
    pub dev_blocks: u64,

    #[allow(missing_docs)]
    #[clap(flatten)]
    pub gateway_params: GatewayParams,
}

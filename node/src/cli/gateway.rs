use std::str::FromStr;
use std::time::Duration;

use clap::Args;
use ec_gateway_server::GatewayConfig;

/// Parameters used to config the gateway.
#[derive(Debug, Clone, Args)]
pub struct GatewayParams {
    /// Listen on all network interfaces. This usually means the gateway server will be accessible externally.
    #[arg(env = "ETHQ_GATEWAY_EXTERNAL", long)]
    pub gateway_external: bool,

    /// The gateway port to listen at.
    #[arg(env = "ETHQ_GATEWAY_PORT", long, value_name = "GATEWAY PORT", default_value_t = 8547)]
    pub gateway_port: u16,

    /// Hostnames accepted in the `Host` header. Use `*` to accept any host.
    #[arg(
        env = "ETHQ_GATEWAY_HOST_ALLOWLIST",
        long,
        value_delimiter = ',',
        default_value = "localhost,127.0.0.1"
    )]
    pub gateway_host_allowlist: Vec<String>,

    /// Browser origins allowed by CORS. `all` (or `*`) allows any origin,
    /// otherwise a comma-separated origin list. Unset disables CORS headers.
    #[arg(env = "ETHQ_GATEWAY_CORS", long, value_name = "ORIGINS")]
    pub gateway_cors: Option<Cors>,

    /// Wall-clock budget in seconds for executing one query item.
    #[arg(env = "ETHQ_GATEWAY_TIMEOUT_SEC", long, default_value_t = 30)]
    pub gateway_timeout_sec: u64,
}

impl GatewayParams {
    pub fn as_gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            port: self.gateway_port,
            external: self.gateway_external,
            host_allowlist: self.gateway_host_allowlist.clone(),
            cors_allowed_origins: match &self.gateway_cors {
                None => vec![],
                Some(Cors::All) => vec!["*".to_string()],
                Some(Cors::List(origins)) => origins.clone(),
            },
            execution_timeout: Duration::from_secs(self.gateway_timeout_sec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cors {
    /// Any origin.
    All,
    /// Only the listed origins.
    List(Vec<String>),
}

impl FromStr for Cors {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" | "*" => Cors::All,
            _ => Cors::List(
                s.split(',').map(|part| part.trim().to_string()).filter(|part| !part.is_empty()).collect(),
            ),
        })
    }
}

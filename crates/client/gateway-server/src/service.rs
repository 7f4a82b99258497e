use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use ec_graphql::SchemaBinding;
use ep_utils::service::ServiceContext;
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::router::main_router;

/// Runtime settings of the gateway endpoint.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port to listen at.
    pub port: u16,
    /// Listen on all interfaces instead of localhost only.
    pub external: bool,
    /// Hostnames accepted in the `Host` header. `*` disables the check.
    pub host_allowlist: Vec<String>,
    /// Origins allowed by CORS. Empty disables CORS headers, `*` allows any.
    pub cors_allowed_origins: Vec<String>,
    /// Wall-clock budget for executing one query item.
    pub execution_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8547,
            external: false,
            host_allowlist: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            cors_allowed_origins: vec![],
            execution_timeout: Duration::from_secs(30),
        }
    }
}

pub async fn start_server(
    schema: Arc<SchemaBinding>,
    config: GatewayConfig,
    ctx: ServiceContext,
) -> anyhow::Result<()> {
    let listen_addr = if config.external {
        Ipv4Addr::UNSPECIFIED // listen on 0.0.0.0
    } else {
        Ipv4Addr::LOCALHOST
    };
    let addr = SocketAddr::new(listen_addr.into(), config.port);
    let listener = TcpListener::bind(addr).await.with_context(|| format!("Opening socket server at {addr}"))?;

    tracing::info!("🌐 GraphQL gateway started at {}", addr);

    run_server(listener, schema, config, ctx).await
}

/// Serves connections on an already-bound listener until the context is
/// cancelled. Split out from [`start_server`] so tests can bind port 0.
pub async fn run_server(
    listener: TcpListener,
    schema: Arc<SchemaBinding>,
    config: GatewayConfig,
    ctx: ServiceContext,
) -> anyhow::Result<()> {
    let config = Arc::new(config);

    while let Some(res) = ctx.run_until_cancelled(listener.accept()).await {
        // Handle new incoming connections
        if let Ok((stream, _)) = res {
            let io = TokioIo::new(stream);

            let schema = Arc::clone(&schema);
            let config = Arc::clone(&config);

            tokio::task::spawn(async move {
                let service =
                    service_fn(move |req| main_router(req, Arc::clone(&schema), Arc::clone(&config)));

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(target: "gateway", "Error serving connection: {err:?}");
                }
            });
        }
    }

    anyhow::Ok(())
}

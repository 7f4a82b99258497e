use tokio_util::sync::CancellationToken;

/// Cooperative cancellation handle threaded through every long-running
/// service loop. Cloning shares the same token; [`ServiceContext::child`]
/// creates a scope that is cancelled with its parent but can also be
/// cancelled on its own.
#[derive(Debug, Clone, Default)]
pub struct ServiceContext {
    token: CancellationToken,
}

impl ServiceContext {
    pub fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    pub fn child(&self) -> Self {
        Self { token: self.token.child_token() }
    }

    pub fn cancel(&self) {
        self.token.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Runs `fut` to completion unless the context is cancelled first, in
    /// which case `None` is returned and `fut` is dropped.
    pub async fn run_until_cancelled<F: std::future::Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            _ = self.token.cancelled() => None,
            res = fut => Some(res),
        }
    }

    /// Cancels this context when the process receives ctrl-c.
    pub fn cancel_on_ctrl_c(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("🔌 Shutdown signal received");
                token.cancel();
            }
        });
    }
}

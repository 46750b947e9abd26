//! OS signal and deadline handling.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancel `token` on the first Ctrl+C.
///
/// If the handler cannot be installed the token is left untouched.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    token.cancel();
                }
                Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
            },
            _ = token.cancelled() => {}
        }
    })
}

/// Cancel `token` once `after` has elapsed.
pub fn cancel_after(token: CancellationToken, after: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(after) => {
                tracing::warn!(deadline = ?after, "Deadline reached, cancelling");
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_deadline() {
        let token = CancellationToken::new();
        let handle = cancel_after(token.clone(), Duration::from_secs(120));

        tokio::time::sleep(Duration::from_secs(119)).await;
        assert!(!token.is_cancelled());

        handle.await.unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_watchers_exit_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        let deadline = cancel_after(token.clone(), Duration::from_secs(3600));
        let signal = cancel_on_ctrl_c(token.clone());

        token.cancel();
        deadline.await.unwrap();
        signal.await.unwrap();
    }
}

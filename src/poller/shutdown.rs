//! Shutdown signal wiring

use std::future::Future;

use tokio::sync::watch;

/// Spawn a task that flips the returned receiver to `true` once `signal`
/// resolves.
///
/// If the signal cannot be listened for, the error is logged and the sender is
/// held forever: a closed channel would otherwise read as a shutdown request.
pub fn shutdown_on<F>(signal: F) -> watch::Receiver<bool>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                tracing::info!("Interrupt received, stopping after the current cycle");
                let _ = tx.send(true);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for interrupt, polling continues");
                std::future::pending::<()>().await;
                drop(tx);
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_requests_shutdown() {
        let mut rx = shutdown_on(async { Ok::<(), std::io::Error>(()) });
        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }

    #[tokio::test]
    async fn test_failed_listener_keeps_channel_open() {
        let mut rx = shutdown_on(async { Err::<(), _>(std::io::Error::other("no signal handler")) });

        let waited = tokio::time::timeout(Duration::from_millis(50), rx.changed()).await;
        assert!(waited.is_err(), "channel must neither close nor change");
        assert_eq!(rx.has_changed().ok(), Some(false));
        assert!(!*rx.borrow());
    }
}

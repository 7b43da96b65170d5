use super::traits::{Channel, ChannelMessage};
use crate::cleanup::engine::CleanupEngine;
use crate::commands::parse_command;
use std::sync::Arc;
use std::time::Duration;

const LISTENER_INITIAL_BACKOFF_SECS: u64 = 2;
const LISTENER_MAX_BACKOFF_SECS: u64 = 60;

/// Keep a channel listener alive, restarting it with doubling backoff
/// when it exits or errors.
pub(crate) fn spawn_supervised_listener(
    ch: Arc<dyn Channel>,
    tx: tokio::sync::mpsc::Sender<ChannelMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut backoff = LISTENER_INITIAL_BACKOFF_SECS;

        loop {
            tracing::debug!(channel = ch.name(), "channel listener starting");
            let result = ch.listen(tx.clone()).await;

            if tx.is_closed() {
                break;
            }

            match result {
                Ok(()) => {
                    tracing::warn!("Channel {} exited unexpectedly; restarting", ch.name());
                    backoff = LISTENER_INITIAL_BACKOFF_SECS;
                }
                Err(e) => {
                    tracing::error!("Channel {} error: {e}; restarting", ch.name());
                }
            }

            tokio::time::sleep(Duration::from_secs(backoff)).await;
            // Double backoff AFTER sleeping so the first error uses the
            // initial backoff.
            backoff = backoff.saturating_mul(2).min(LISTENER_MAX_BACKOFF_SECS);
        }
    })
}

/// Run the bot: listen on the channel and feed each inbound message to
/// the cleanup engine.
///
/// Messages are processed to completion one at a time, in arrival order.
/// Combined with the per-channel session lock inside the engine this is
/// the single-writer discipline: no command is accepted for a chat while
/// a deletion batch for that chat is still running.
pub async fn run(engine: Arc<CleanupEngine>, channel: Arc<dyn Channel>) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<ChannelMessage>(64);
    let listener = spawn_supervised_listener(channel.clone(), tx);

    tracing::info!(channel = channel.name(), "bot started");

    while let Some(msg) = rx.recv().await {
        let command = parse_command(&msg.content);
        tracing::debug!(sender = %msg.sender, ?command, "inbound command");

        if let Err(e) = engine.handle(&msg.sender, command).await {
            tracing::error!(sender = %msg.sender, error = %e, "command handling failed");
            let _ = channel
                .send(
                    "❌ An error occurred. Please try again or check the server logs.",
                    &msg.sender,
                )
                .await;
        }
    }

    listener.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AlwaysFailChannel {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Channel for AlwaysFailChannel {
        fn name(&self) -> &str {
            "test-supervised-fail"
        }

        async fn send(&self, _message: &str, _recipient: &str) -> anyhow::Result<()> {
            Ok(())
        }

        async fn listen(
            &self,
            _tx: tokio::sync::mpsc::Sender<ChannelMessage>,
        ) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("listen boom")
        }
    }

    #[tokio::test]
    async fn supervised_listener_restarts_on_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let channel: Arc<dyn Channel> = Arc::new(AlwaysFailChannel {
            calls: Arc::clone(&calls),
        });

        let (tx, rx) = tokio::sync::mpsc::channel::<ChannelMessage>(1);
        let handle = spawn_supervised_listener(channel, tx);

        tokio::time::sleep(Duration::from_millis(80)).await;
        drop(rx);
        handle.abort();
        let _ = handle.await;

        assert!(calls.load(Ordering::SeqCst) >= 1);
    }
}

use async_trait::async_trait;

/// A message received from a channel.
///
/// `sender` is the chat/channel identifier replies go back to; it doubles
/// as the cleanup session key.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub channel: String,
    pub timestamp: u64,
}

/// Core channel trait — implement for any messaging platform.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name
    fn name(&self) -> &str;

    /// Send a message through this channel
    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()>;

    /// Start listening for incoming messages (long-running)
    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()>;

    /// Check if channel is healthy
    async fn health_check(&self) -> bool {
        true
    }

    /// Hard payload limit of the transport, in characters.
    fn max_message_length(&self) -> usize {
        usize::MAX
    }

    /// Send an arbitrary text, split to fit the transport limit. Reports
    /// built record-by-record should go through
    /// [`super::chunker::ReportChunker`] instead so records stay whole.
    async fn send_chunked(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        for chunk in super::chunker::split_message(message, self.max_message_length()) {
            self.send(&chunk, recipient).await?;
        }
        Ok(())
    }
}

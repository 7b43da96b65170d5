use super::traits::{Channel, ChannelMessage};
use async_trait::async_trait;
use uuid::Uuid;

/// Telegram channel — long-polls the Bot API for updates.
///
/// Exactly one chat id is allow-listed; updates from anyone else are
/// logged and dropped.
pub struct TelegramChannel {
    bot_token: String,
    allowed_chat_id: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, allowed_chat_id: String) -> Self {
        Self {
            bot_token,
            allowed_chat_id,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    fn is_chat_allowed(&self, chat_id: &str) -> bool {
        chat_id == self.allowed_chat_id
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn max_message_length(&self) -> usize {
        4096
    }

    async fn send(&self, message: &str, chat_id: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": message,
        });

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            anyhow::bail!("Telegram sendMessage failed ({status}): {err}");
        }

        Ok(())
    }

    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()> {
        let mut offset: i64 = 0;

        tracing::info!("Telegram channel listening for messages...");

        loop {
            let body = serde_json::json!({
                "offset": offset,
                "timeout": 30,
                "allowed_updates": ["message"]
            });

            let resp = match self
                .client
                .post(self.api_url("getUpdates"))
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Telegram poll error: {e}");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                }
            };

            let data: serde_json::Value = match resp.json().await {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Telegram parse error: {e}");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                }
            };

            let Some(results) = data.get("result").and_then(serde_json::Value::as_array) else {
                continue;
            };

            for update in results {
                if let Some(uid) = update.get("update_id").and_then(serde_json::Value::as_i64) {
                    offset = uid + 1;
                }

                let Some(message) = update.get("message") else {
                    continue;
                };
                let Some(text) = message.get("text").and_then(serde_json::Value::as_str) else {
                    continue;
                };

                let chat_id = message
                    .get("chat")
                    .and_then(|c| c.get("id"))
                    .and_then(serde_json::Value::as_i64)
                    .map(|id| id.to_string())
                    .unwrap_or_default();

                if !self.is_chat_allowed(&chat_id) {
                    tracing::warn!(chat_id = %chat_id, "ignoring message from unauthorized chat");
                    continue;
                }

                let msg = ChannelMessage {
                    id: Uuid::new_v4().to_string(),
                    sender: chat_id,
                    content: text.to_string(),
                    channel: "telegram".to_string(),
                    timestamp: std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs(),
                };

                if tx.send(msg).await.is_err() {
                    return Ok(());
                }
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_configured_chat_is_allowed() {
        let channel = TelegramChannel::new("tok".into(), "12345".into());
        assert!(channel.is_chat_allowed("12345"));
        assert!(!channel.is_chat_allowed("54321"));
        assert!(!channel.is_chat_allowed(""));
    }

    #[test]
    fn telegram_payload_limit_is_4096() {
        let channel = TelegramChannel::new("tok".into(), "1".into());
        assert_eq!(channel.max_message_length(), 4096);
    }
}

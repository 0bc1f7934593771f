//! Best-effort audit records posted to the log channel.
//!
//! Emission never fails from the caller's point of view: a missing log channel
//! is a local warning and any delivery problem is only logged to the console.

use crate::core::messenger::{Embed, Messenger};
use tracing::{error, warn};

/// Embed colour for credit updates (green).
pub const CREDIT_UPDATE_COLOUR: u32 = 0x0032_cd32;
/// Embed colour for announcement usage (orange red).
pub const ANNOUNCEMENT_USAGE_COLOUR: u32 = 0x00ff_4500;

/// Posts `record` to `log_channel_id` if one is configured.
pub async fn emit<M: Messenger>(messenger: &M, log_channel_id: Option<u64>, record: Embed) {
    let Some(channel_id) = log_channel_id else {
        warn!(title = %record.title, "LOG_CHANNEL_ID is not set; audit record dropped");
        return;
    };

    let channel = match messenger.fetch_channel(channel_id).await {
        Ok(Some(channel)) => channel,
        Ok(None) => {
            error!(channel_id, "Log channel not found; audit record dropped");
            return;
        }
        Err(e) => {
            error!(channel_id, "Failed to fetch log channel: {}", e);
            return;
        }
    };

    if let Err(e) = messenger.send_embed(&channel, record).await {
        error!(channel_id, "Failed to send audit record to log channel: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LOG_CHANNEL, RecordingMessenger};

    fn record() -> Embed {
        Embed::new(CREDIT_UPDATE_COLOUR, "Test (LOG)", "body").field("a", "b", true)
    }

    #[tokio::test]
    async fn test_emit_posts_to_log_channel() {
        let messenger = RecordingMessenger::new();

        emit(&messenger, Some(LOG_CHANNEL), record()).await;

        let sent = messenger.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, LOG_CHANNEL);
        assert_eq!(sent[0].1.title, "Test (LOG)");
    }

    #[tokio::test]
    async fn test_emit_without_log_channel_is_a_no_op() {
        let messenger = RecordingMessenger::new();

        emit(&messenger, None, record()).await;

        assert!(messenger.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_emit_swallows_missing_channel_and_send_failures() {
        let missing = RecordingMessenger::new().without_channel(LOG_CHANNEL);
        emit(&missing, Some(LOG_CHANNEL), record()).await;
        assert!(missing.sent().await.is_empty());

        let failing = RecordingMessenger::new().failing_sends_to(LOG_CHANNEL);
        emit(&failing, Some(LOG_CHANNEL), record()).await;
        assert!(failing.sent().await.is_empty());
    }
}

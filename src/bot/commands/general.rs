//! General Discord commands - `ping`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, core::latency, errors::Result};
    use chrono::Utc;
    use poise::CreateReply;
    use tracing::info;

    /// Botun gecikme süresini (latency) gösterir.
    ///
    /// Bot latency is measured from the interaction's snowflake timestamp, API
    /// latency is the gateway heartbeat round trip.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        info!("Ping command received from user: {}", ctx.author().name);
        let bot_latency = latency::elapsed_since_snowflake(ctx.id(), Utc::now());
        let api_latency = ctx.ping().await.as_millis();

        ctx.send(
            CreateReply::default()
                .content(super::ping_reply(bot_latency, api_latency))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

fn ping_reply(bot_latency_ms: u64, api_latency_ms: u128) -> String {
    format!("🏓 Pong! Bot Gecikmesi: **{bot_latency_ms}ms**, API Gecikmesi: **{api_latency_ms}ms**")
}

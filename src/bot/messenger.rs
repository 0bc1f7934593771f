//! Serenity-backed implementation of the core [`Messenger`] trait.

use crate::{
    core::messenger::{Embed, Messenger},
    errors::Result,
};
use poise::serenity_prelude::{
    self as serenity, ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, Timestamp,
};
use tracing::debug;

/// Sends messages through the Discord HTTP API.
pub struct DiscordMessenger<'a> {
    http: &'a serenity::Http,
}

impl<'a> DiscordMessenger<'a> {
    /// Wraps the HTTP client of the current command context.
    #[must_use]
    pub const fn new(http: &'a serenity::Http) -> Self {
        Self { http }
    }
}

impl Messenger for DiscordMessenger<'_> {
    type Channel = ChannelId;

    async fn fetch_channel(&self, channel_id: u64) -> Result<Option<ChannelId>> {
        if channel_id == 0 {
            return Ok(None);
        }
        match ChannelId::new(channel_id).to_channel(self.http).await {
            Ok(channel) => Ok(Some(channel.id())),
            Err(serenity::Error::Http(e))
                if e.status_code().map(|status| status.as_u16()) == Some(404) =>
            {
                debug!(channel_id, "Channel lookup returned 404");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn send_embed(&self, channel: &ChannelId, embed: Embed) -> Result<()> {
        channel
            .send_message(self.http, CreateMessage::new().embed(to_create_embed(embed)))
            .await?;
        Ok(())
    }
}

/// Converts the core embed model into a serenity builder.
#[must_use]
pub fn to_create_embed(embed: Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .colour(embed.colour)
        .title(embed.title)
        .description(embed.description);

    if let Some(url) = embed.url {
        builder = builder.url(url);
    }
    if let Some(author) = embed.author {
        let mut author_builder = CreateEmbedAuthor::new(author.name);
        if let Some(icon_url) = author.icon_url {
            author_builder = author_builder.icon_url(icon_url);
        }
        builder = builder.author(author_builder);
    }
    for field in embed.fields {
        builder = builder.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if let Ok(timestamp) = Timestamp::from_unix_timestamp(embed.timestamp.timestamp()) {
        builder = builder.timestamp(timestamp);
    }
    builder
}

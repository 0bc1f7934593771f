//! The messaging collaborator seam.
//!
//! The core never talks to Discord directly. It builds [`Embed`] values and
//! hands them to a [`Messenger`], which the bot layer implements on top of
//! serenity and tests implement with a recording fake.

use crate::errors::Result;
use chrono::{DateTime, Utc};
use std::future::Future;

/// One name/value field of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field title
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether Discord may place the field next to others
    pub inline: bool,
}

/// Author line shown at the top of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    /// Author name
    pub name: String,
    /// Author icon
    pub icon_url: Option<String>,
}

/// A rich message, independent of any Discord library type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Sidebar colour as `0xRRGGBB`
    pub colour: u32,
    /// Embed title
    pub title: String,
    /// Link attached to the title
    pub url: Option<String>,
    /// Author line
    pub author: Option<EmbedAuthor>,
    /// Main text
    pub description: String,
    /// Structured fields
    pub fields: Vec<EmbedField>,
    /// Footer text
    pub footer: Option<String>,
    /// Time shown next to the footer
    pub timestamp: DateTime<Utc>,
}

impl Embed {
    /// Starts an embed stamped with the current time.
    #[must_use]
    pub fn new(colour: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            colour,
            title: title.into(),
            url: None,
            author: None,
            description: description.into(),
            fields: Vec::new(),
            footer: None,
            timestamp: Utc::now(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

/// Outbound operations the core needs from the chat platform.
pub trait Messenger: Sync {
    /// A resolved channel that messages can be sent to.
    type Channel: Send + Sync;

    /// Resolves a channel ID. `Ok(None)` means the channel does not exist or the
    /// bot cannot see it; callers must report that rather than drop the message.
    fn fetch_channel(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Result<Option<Self::Channel>>> + Send;

    /// Posts an embed to a previously resolved channel.
    fn send_embed(
        &self,
        channel: &Self::Channel,
        embed: Embed,
    ) -> impl Future<Output = Result<()>> + Send;
}

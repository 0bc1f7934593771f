//! Shared test utilities for `PartnerBuddy`.
//!
//! Provides a fake messaging collaborator and builders for actors, requests
//! and configuration with sensible defaults.

use crate::{
    config::AppConfig,
    core::{
        messenger::{Embed, Messenger},
        partner::AnnouncementRequest,
        policy::Actor,
    },
    errors::{Error, Result},
};
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Staff role used by [`test_config`].
pub const STAFF_ROLE: u64 = 900;
/// Log channel used by [`test_config`].
pub const LOG_CHANNEL: u64 = 500;
/// Announcement channel used by [`test_config`].
pub const ANNOUNCEMENT_CHANNEL: u64 = 600;

/// Configuration with every identifier set.
pub fn test_config() -> AppConfig {
    AppConfig {
        partner_role_id: Some(STAFF_ROLE),
        log_channel_id: Some(LOG_CHANNEL),
        announcement_channel_id: Some(ANNOUNCEMENT_CHANNEL),
        dev_guild_id: None,
    }
}

/// A regular guild member without the staff role.
pub fn member(id: u64) -> Actor {
    Actor {
        id,
        tag: format!("user{id}"),
        avatar_url: Some(format!("https://cdn.example/avatars/{id}.png")),
        roles: vec![1, 2],
    }
}

/// A guild member holding the staff role.
pub fn staff(id: u64) -> Actor {
    let mut actor = member(id);
    actor.roles.push(STAFF_ROLE);
    actor
}

/// An announcement request from "Test Sunucu".
pub fn request(invite_link: &str, message: &str) -> AnnouncementRequest {
    AnnouncementRequest {
        guild_name: "Test Sunucu".to_string(),
        invite_link: invite_link.to_string(),
        message: message.to_string(),
    }
}

/// Fake messenger that records every embed it is asked to send.
///
/// Channels are resolvable unless marked missing; sends succeed unless the
/// channel is marked failing.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    missing: HashSet<u64>,
    failing: HashSet<u64>,
    sent: Mutex<Vec<(u64, Embed)>>,
}

impl RecordingMessenger {
    /// All channels resolvable, all sends succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// `fetch_channel` reports `channel_id` as not found.
    pub fn without_channel(mut self, channel_id: u64) -> Self {
        self.missing.insert(channel_id);
        self
    }

    /// `send_embed` to `channel_id` fails with a long permissions error.
    pub fn failing_sends_to(mut self, channel_id: u64) -> Self {
        self.failing.insert(channel_id);
        self
    }

    /// Everything sent so far, as `(channel_id, embed)`.
    pub async fn sent(&self) -> Vec<(u64, Embed)> {
        self.sent.lock().await.clone()
    }

    /// Embeds sent to one channel.
    pub async fn sent_to(&self, channel_id: u64) -> Vec<Embed> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| *id == channel_id)
            .map(|(_, embed)| embed.clone())
            .collect()
    }
}

impl Messenger for RecordingMessenger {
    type Channel = u64;

    async fn fetch_channel(&self, channel_id: u64) -> Result<Option<u64>> {
        Ok((!self.missing.contains(&channel_id)).then_some(channel_id))
    }

    async fn send_embed(&self, channel: &u64, embed: Embed) -> Result<()> {
        if self.failing.contains(channel) {
            return Err(Error::DeliveryFailure {
                message: format!(
                    "Missing Permissions: the bot cannot send messages in channel {channel}. {}",
                    "Check the channel overrides for the bot role and try again later."
                ),
            });
        }
        self.sent.lock().await.push((*channel, embed));
        Ok(())
    }
}

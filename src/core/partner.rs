//! Partnership flows - setting credits and publishing announcements.
//!
//! Both flows commit the ledger change first and then perform their outbound
//! sends. Sends are best-effort and never roll the ledger back: a credit spent
//! on an announcement that could not be delivered is not refunded.

use crate::{
    config::AppConfig,
    core::{
        audit,
        ledger::{ConsumeOutcome, CreditChange, CreditLedger},
        messenger::{Embed, EmbedAuthor, Messenger},
        policy::{self, Actor},
    },
    errors::{Error, Result},
};
use tracing::{error, info, instrument};

/// Embed colour of the public announcement (blue).
pub const ANNOUNCEMENT_COLOUR: u32 = 0x0000_99ff;

/// Longest delivery diagnostic shown back to the user, in characters.
pub const MAX_DIAGNOSTIC_CHARS: usize = 100;

/// User whose credits are being set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUser {
    /// Discord user ID
    pub id: u64,
    /// Display tag
    pub tag: String,
}

/// What the user asked to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementRequest {
    /// Name of the guild the command was used in
    pub guild_name: String,
    /// Invite link as typed by the user
    pub invite_link: String,
    /// Free-form partnership message
    pub message: String,
}

/// Result of a successful `announce` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// The announcement was posted.
    Published {
        /// Channel the announcement went to
        channel_id: u64,
        /// Credits the user has left
        remaining: u64,
    },
    /// The user had no credits; nothing was sent.
    Denied,
}

/// Sets `target`'s credits and records the change in the log channel.
#[instrument(skip(messenger, ledger, config, actor, target), fields(actor_id = actor.id, target_id = target.id))]
pub async fn grant_credits<M: Messenger>(
    messenger: &M,
    ledger: &CreditLedger,
    config: &AppConfig,
    actor: &Actor,
    target: &TargetUser,
    count: i64,
) -> Result<CreditChange> {
    let change =
        policy::set_credits(ledger, actor, config.partner_role_id, target.id, count).await?;
    info!(
        previous = change.previous,
        current = change.current,
        "Partner credits set"
    );

    let record = Embed::new(
        audit::CREDIT_UPDATE_COLOUR,
        "Partner Hak Güncelleme (LOG)",
        "**Partner Hakları Başarıyla Ayarlandı**",
    )
    .field("Yetkiyi Ayarlayan", actor.tag.clone(), false)
    .field("Kullanıcı", format!("{} ({})", target.tag, target.id), true)
    .field("Yeni Hak Sayısı", change.current.to_string(), true);
    audit::emit(messenger, config.log_channel_id, record).await;

    Ok(change)
}

/// Spends one of `actor`'s credits and posts their announcement.
///
/// Order matters: the announcement channel must be configured before any
/// credit is touched, and the credit is spent before anything is sent.
#[instrument(skip(messenger, ledger, config, actor, request), fields(actor_id = actor.id))]
pub async fn announce<M: Messenger>(
    messenger: &M,
    ledger: &CreditLedger,
    config: &AppConfig,
    actor: &Actor,
    request: &AnnouncementRequest,
) -> Result<AnnounceOutcome> {
    let channel_id = config
        .announcement_channel_id
        .ok_or(Error::ConfigurationMissing {
            setting: "PARTNER_DUYURU_KANAL_ID",
        })?;

    let remaining = match ledger.try_consume(actor.id).await {
        ConsumeOutcome::Allowed { remaining } => remaining,
        ConsumeOutcome::Denied => {
            info!("Announcement denied: no partner credits left");
            return Ok(AnnounceOutcome::Denied);
        }
    };

    let invite_link = normalize_invite_link(&request.invite_link);
    let embed = announcement_embed(actor, request, &invite_link, remaining);

    if let Err(e) = publish(messenger, channel_id, embed).await {
        error!(
            channel_id,
            "Failed to post partnership announcement: {}", e
        );
        return Err(Error::DeliveryFailure {
            message: truncate_diagnostic(&diagnostic(e)),
        });
    }
    info!(channel_id, remaining, "Partnership announcement published");

    let record = Embed::new(
        audit::ANNOUNCEMENT_USAGE_COLOUR,
        "Partner Kullanım Kaydı (LOG)",
        "**Partnerlik Başarıyla Yapıldı ve Hak Düşüldü**",
    )
    .field("Kullanan Kullanıcı", format!("{} ({})", actor.tag, actor.id), false)
    .field("Yapılan Kanal", format!("<#{channel_id}>"), true)
    .field("Kalan Hak", remaining.to_string(), true)
    .field("Davet Linki", invite_link, false);
    audit::emit(messenger, config.log_channel_id, record).await;

    Ok(AnnounceOutcome::Published {
        channel_id,
        remaining,
    })
}

async fn publish<M: Messenger>(messenger: &M, channel_id: u64, embed: Embed) -> Result<()> {
    let channel = messenger
        .fetch_channel(channel_id)
        .await?
        .ok_or_else(|| Error::DeliveryFailure {
            message: format!(
                "Duyuru kanalı ({channel_id}) bot tarafından bulunamadı veya erişilemiyor."
            ),
        })?;
    messenger.send_embed(&channel, embed).await
}

/// Builds the public announcement embed.
#[must_use]
pub fn announcement_embed(
    actor: &Actor,
    request: &AnnouncementRequest,
    invite_link: &str,
    remaining: u64,
) -> Embed {
    let mut embed = Embed::new(
        ANNOUNCEMENT_COLOUR,
        format!("✨ Yeni Partner Sunucu: {} ✨", request.guild_name),
        format!(
            "**Partnerlik Mesajı:**\n\n{}\n\n**Davet Linki:** {invite_link}",
            request.message
        ),
    );
    embed.url = Some(invite_link.to_string());
    embed.author = Some(EmbedAuthor {
        name: actor.tag.clone(),
        icon_url: actor.avatar_url.clone(),
    });
    embed.footer = Some(format!(
        "Duyuru {} tarafından yapıldı. | Kalan Hak: {remaining}",
        request.guild_name
    ));
    embed
}

/// Prepends `https://` when the link has no http(s) scheme, so Discord accepts
/// it as an embed URL.
#[must_use]
pub fn normalize_invite_link(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

/// Keeps the first [`MAX_DIAGNOSTIC_CHARS`] characters of a diagnostic.
#[must_use]
pub fn truncate_diagnostic(message: &str) -> String {
    message.chars().take(MAX_DIAGNOSTIC_CHARS).collect()
}

fn diagnostic(error: Error) -> String {
    match error {
        Error::DeliveryFailure { message } => message,
        Error::Framework(e) => e.to_string(),
        other => other.to_string(),
    }
}

//! Partnership Discord commands - `partner` and `partnerhak`.
//!
//! The handlers gather the invoking user, the options and the guild name, run
//! the matching core flow and turn its outcome into a reply. Domain errors
//! become replies here; only framework errors reach the error hook.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, invoking_actor, messenger::DiscordMessenger},
        core::{
            partner::{self, AnnouncementRequest, TargetUser},
            policy,
        },
        errors::Result,
    };
    use poise::{CreateReply, serenity_prelude as serenity};
    use tracing::info;

    /// Sunucunuzun partnerlik duyurusunu yapar.
    ///
    /// Spends one partnership credit and posts the announcement to the
    /// configured announcement channel. The reply is only visible to the caller.
    #[poise::command(slash_command, guild_only)]
    pub async fn partner(
        ctx: Context<'_>,
        #[rename = "davet-linki"]
        #[description = "Partner sunucunun davet linki."]
        invite_link: String,
        #[rename = "mesaj"]
        #[description = "Partnerlik mesajının içeriği."]
        message: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let data = ctx.data();
        let actor = invoking_actor(ctx).await;
        let guild_name = ctx
            .partial_guild()
            .await
            .map_or_else(|| super::UNKNOWN_GUILD.to_string(), |guild| guild.name);
        info!(user = actor.id, guild = %guild_name, "Partner command received");

        let request = AnnouncementRequest {
            guild_name,
            invite_link,
            message,
        };
        let messenger = DiscordMessenger::new(ctx.http());
        let outcome =
            partner::announce(&messenger, &data.ledger, &data.config, &actor, &request).await;

        ctx.say(super::announce_reply(outcome)?).await?;
        Ok(())
    }

    /// Belirtilen kullanıcıya partnerlik kullanım hakkı ekler/ayarlar.
    ///
    /// Overwrites the target's credit count. Only members holding the partner
    /// staff role may use it.
    #[poise::command(slash_command, guild_only)]
    pub async fn partnerhak(
        ctx: Context<'_>,
        #[rename = "kullanici"]
        #[description = "Hak ayarlanacak kullanıcı."]
        user: serenity::User,
        #[rename = "hak-sayisi"]
        #[description = "Kullanıcıya verilecek yeni hak sayısı (0 ve üzeri)."]
        #[min = 0]
        count: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let actor = invoking_actor(ctx).await;

        if !policy::is_authorized(&actor.roles, data.config.partner_role_id) {
            info!(user = actor.id, "Partnerhak refused: missing staff role");
            ctx.send(
                CreateReply::default()
                    .content(super::UNAUTHORIZED_REPLY)
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        ctx.defer().await?;

        let target = TargetUser {
            id: user.id.get(),
            tag: user.tag(),
        };
        let messenger = DiscordMessenger::new(ctx.http());
        let change = partner::grant_credits(
            &messenger,
            &data.ledger,
            &data.config,
            &actor,
            &target,
            count,
        )
        .await;

        ctx.say(super::set_credits_reply(&target, change)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

use crate::{
    core::{
        ledger::CreditChange,
        partner::{AnnounceOutcome, TargetUser},
    },
    errors::{Error, Result},
};

const UNKNOWN_GUILD: &str = "Bilinmeyen Sunucu";

const UNAUTHORIZED_REPLY: &str =
    "Bu komutu kullanmak için ayarlanan **Partner Yetkilisi Rolü**ne sahip olmalısınız.";

/// Reply text for `/partner`; framework errors are passed through.
fn announce_reply(outcome: Result<AnnounceOutcome>) -> Result<String> {
    match outcome {
        Ok(AnnounceOutcome::Published {
            channel_id,
            remaining,
        }) => Ok(format!(
            "**Partnerlik Duyurusu Başarıyla Yapıldı!** Duyuru <#{channel_id}> kanalına gönderildi. Kalan Hakkınız: **{remaining}**"
        )),
        Ok(AnnounceOutcome::Denied) => {
            Ok("Partnerlik duyurusu yapmak için **kalan hakkınız bulunmamaktadır**.".to_string())
        }
        Err(Error::ConfigurationMissing { setting }) => Ok(format!(
            "HATA: Partnerlik duyurusu kanalı `.env` dosyasında ayarlanmamış (`{setting}`)."
        )),
        Err(Error::DeliveryFailure { message }) => {
            Ok(format!("Duyuru mesajı gönderilemedi! Hata: {message}"))
        }
        Err(e) => Err(e),
    }
}

/// Reply text for `/partnerhak`; framework errors are passed through.
fn set_credits_reply(target: &TargetUser, change: Result<CreditChange>) -> Result<String> {
    match change {
        Ok(change) => Ok(format!(
            "✅ **{}** kullanıcısının partnerlik hakkı başarıyla **{}** olarak ayarlandı. (Önceki Hak: {})",
            target.tag, change.current, change.previous
        )),
        Err(Error::Unauthorized) => Ok(UNAUTHORIZED_REPLY.to_string()),
        Err(Error::InvalidArgument { .. }) => {
            Ok("❌ Hak sayısı 0 veya daha büyük olmalıdır.".to_string())
        }
        Err(e) => Err(e),
    }
}

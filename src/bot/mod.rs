//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `PartnerBuddy` application:
//! the slash commands, the serenity-backed messenger, the error hook and the
//! client/framework setup.

/// Discord command implementations (partner, general)
pub mod commands;
/// Serenity implementation of the core messaging seam
pub mod messenger;

use crate::{
    config::AppConfig,
    core::{ledger::CreditLedger, policy::Actor},
    errors::Error,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the credit ledger and the configuration loaded at startup.
pub struct BotData {
    /// Partnership credits, alive for the lifetime of the process
    pub ledger: CreditLedger,
    /// Role and channel settings
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` with an empty ledger.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            ledger: CreditLedger::new(),
            config,
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Builds the core [`Actor`] for the user invoking a command.
///
/// Roles are only known inside a guild; in DMs the actor has none.
pub async fn invoking_actor(ctx: Context<'_>) -> Actor {
    let user = ctx.author();
    let roles = ctx
        .author_member()
        .await
        .map(|member| member.roles.iter().map(|role| role.get()).collect())
        .unwrap_or_default();

    Actor {
        id: user.id.get(),
        tag: user.tag(),
        avatar_url: Some(user.face()),
        roles,
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("Bir hata oluştu: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, config))]
pub async fn run_bot(token: String, config: Arc<AppConfig>) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::partner(),
                commands::partnerhak(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                if let Some(guild_id) = config.dev_guild_id {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        guild_id,
                    )
                    .await?;
                    info!("Registered commands in guild {}", guild_id);
                }
                Ok(BotData::new(config))
            })
        })
        .build();

    // Slash commands only need guild events
    let intents = serenity::GatewayIntents::GUILDS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))
}

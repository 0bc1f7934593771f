use dotenvy::dotenv;
use partner_buddy::{
    bot, config,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    if dotenv().is_ok() {
        info!("Loaded .env file.");
    }

    // 3. Load role and channel settings; missing values only disable features
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. The token is read directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .or_else(|_| env::var("BOT_TOKEN"))
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN (or BOT_TOKEN) not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, Arc::new(app_config))
        .await
        .map_err(Error::from)?;

    Ok(())
}

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use sgb_core::{config::Config, logging, relay::Relay};
use sgb_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> Result<(), sgb_core::Error> {
    let cfg = Arc::new(Config::load()?);
    let _guard = logging::init(&cfg)?;

    let bot = Bot::new(cfg.telegram_bot_token.clone());
    match bot.get_me().await {
        Ok(me) => info!(bot = me.username(), "starting suggestion relay"),
        Err(e) => info!("starting suggestion relay (getMe failed: {e})"),
    }

    let messenger = Arc::new(TelegramMessenger::new(bot));
    let mut relay = Relay::new(cfg, messenger);

    tokio::select! {
        _ = relay.run() => {}
        _ = tokio::signal::ctrl_c() => info!("stopped by interrupt"),
    }

    Ok(())
}

use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use popcorn_core::{
    config::Config, messaging::port::MessagingPort, metadata::MetadataPort,
    router::EventRouter,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: EventRouter,
    /// Commands addressed to any other `@bot` are ignored.
    pub bot_username: String,
}

pub async fn run_polling(cfg: Arc<Config>, metadata: Arc<dyn MetadataPort>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let bot_username = match bot.get_me().await {
        Ok(me) => {
            tracing::info!(username = %me.username(), "bot started");
            me.username().to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "getMe failed; starting anyway");
            cfg.bot_username.clone()
        }
    };
    tracing::info!(
        public_channel = %cfg.public_channel,
        private_channel = %cfg.private_channel,
        audit = cfg.log_channel.is_some(),
        search = metadata.is_configured(),
        gate_content_callbacks = cfg.gate_content_callbacks,
        "configuration loaded"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        router: EventRouter::new(&cfg, messenger, metadata),
        bot_username,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|_| async {})
        .build()
        .dispatch()
        .await;

    Ok(())
}

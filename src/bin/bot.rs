use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use reminder_bot::core::{Config, StoreBackend};
use reminder_bot::transport::{send_and_log, strip_bot_mention};
use reminder_bot::{
    ChatAddress, CommandHandler, Database, MemoryStore, ReminderScheduler, ReminderStore,
    SerenityTransport,
};

struct Handler {
    command_handler: Arc<CommandHandler>,
}

impl Handler {
    fn new(command_handler: CommandHandler) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
        }
    }

    /// Command text for the bot: every DM, and guild messages that mention it
    fn command_text(ctx: &Context, msg: &Message) -> Option<String> {
        if msg.guild_id.is_none() {
            return Some(msg.content.clone());
        }

        let bot_id = ctx.cache.current_user_id();
        if msg.mentions.iter().any(|user| user.id == bot_id) {
            Some(strip_bot_mention(&msg.content, bot_id.0))
        } else {
            None
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(body) = Self::command_text(&ctx, &msg) else {
            return;
        };

        let sender = format!("{}/{}", msg.author.id, msg.channel_id);
        let reply = self.command_handler.handle_message(&sender, &body).await;

        match ChatAddress::parse(&sender) {
            Ok(address) => {
                let transport = SerenityTransport::new(ctx.http.clone());
                send_and_log(&transport, &address, &reply).await;
            }
            Err(e) => error!("Cannot reply to {sender}: {e}"),
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting MyReminderBot...");

    let store: Arc<dyn ReminderStore> = match config.store_backend {
        StoreBackend::Sqlite => Arc::new(Database::new(&config.database_path).await?),
        StoreBackend::Memory => {
            warn!("Using in-memory reminder store; reminders are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let command_handler = CommandHandler::new(store.clone(), config.homepage.clone());
    let handler = Handler::new(command_handler);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    // Start the reminder sweep
    let transport = Arc::new(SerenityTransport::new(client.cache_and_http.http.clone()));
    let scheduler = ReminderScheduler::new(store, transport, config.sweep_interval);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    info!("Establishing WebSocket connection to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}

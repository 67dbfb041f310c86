//! Bot layer - Discord-specific interface and command handlers
//!
//! Users talk to the bot in DMs (or by mentioning it in a server). Plain text
//! and receipt photos are logged through [`crate::core::intake`]; reports and
//! account management are slash/prefix commands.

/// Discord command implementations (expense, report, account, general)
pub mod commands;
/// Discord event handlers (free-text messages, receipt photos)
pub mod handlers;

use crate::{ai::ExpenseExtractor, config::AppConfig, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Prefix for text commands (`!today`); messages starting with it are never logged as expenses
pub const COMMAND_PREFIX: &str = "!";

/// Reply sent when a command or message could not be handled
pub const FAILURE_REPLY: &str = "Waduh, ada yang error 😵 Coba lagi bentar ya.";

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Gateway to the extraction model
    pub extractor: Arc<dyn ExpenseExtractor>,
    /// Loaded application configuration
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub fn new(
        database: Arc<DatabaseConnection>,
        extractor: Arc<dyn ExpenseExtractor>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            database,
            extractor,
            config,
        }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(FAILURE_REPLY).await {
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

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        handlers::message::handle_message(ctx, new_message, framework.bot_id, data).await?;
    }
    Ok(())
}

/// Every command the bot registers
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::start(),
        commands::help(),
        commands::ping(),
        commands::credits(),
        commands::catat(),
        commands::undo(),
        commands::today(),
        commands::week(),
        commands::month(),
        commands::recent(),
        commands::setpassword(),
        commands::setalias(),
    ]
}

/// Connects to Discord and runs until the client stops.
#[instrument(skip_all)]
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: Arc<DatabaseConnection>,
    extractor: Arc<dyn ExpenseExtractor>,
) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());
                Ok(BotData::new(database, extractor, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

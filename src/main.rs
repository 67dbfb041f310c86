use aturuang::{
    ai::{ExpenseExtractor, OpenRouterBackend},
    bot,
    config::{self, database},
    dashboard::{self, DashboardState},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment directly
    dotenv().ok();

    // 3. Load the application configuration (config.toml + environment)
    let app_config = Arc::new(
        config::load_app_config()
            .inspect_err(|e| error!("Failed to load configuration: {}", e))?,
    );
    info!(
        text_model = %app_config.text_model,
        vision_model = %app_config.vision_model,
        utc_offset_hours = app_config.utc_offset_hours,
        "Configuration loaded"
    );

    // 4. Connect to the database and make sure the tables exist
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    let db = Arc::new(db);

    // 5. Model gateway shared by every user turn
    let extractor: Arc<dyn ExpenseExtractor> =
        Arc::new(OpenRouterBackend::from_config(&app_config));

    // 6. Dashboard API in the background
    let dashboard_state = DashboardState::new(Arc::clone(&db), Arc::clone(&app_config));
    let web_port = app_config.web_port;
    tokio::spawn(async move {
        if let Err(e) = dashboard::serve(dashboard_state, web_port).await {
            error!("Dashboard API stopped: {}", e);
        }
    });

    // 7. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, app_config, db, extractor).await
}

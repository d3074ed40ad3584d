//! Partybot - LINE bot for live events
//!
//! Guests arm a mode with a trigger phrase, then send danmaku for the big
//! screen or photos for the print station.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Expiring key-value store using Moka
//! - `modes` - Per-user armed modes on top of the cache
//! - `line` - LINE Messaging API adapter
//! - `bot` - Dispatcher, webhook and server runtime
//! - `events` - Danmaku and photo actions
//! - `database` - MongoDB persistence
//! - `storage` - Local image directory
//! - `display` - WebSocket fan-out to displays
//! - `i18n` - Reply texts
//! - `utils` - Utility functions

mod bot;
mod cache;
mod config;
mod database;
mod display;
mod events;
mod i18n;
mod line;
mod modes;
mod storage;
mod utils;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::ports::Services;
use bot::{AppState, Dispatcher};
use cache::CacheConfig;
use config::Config;
use database::{Database, MessageRepository, PhotoRepository};
use display::DanmakuHub;
use line::LineClient;
use modes::ModeResolver;
use storage::ImageDirectory;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("partybot=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting partybot...");

    i18n::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!(
        "Windows: danmaku {:?}, photo {:?}",
        config.dispatch.danmaku_window, config.dispatch.photo_window
    );

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    info!("Database connected");

    let line = LineClient::new(
        config.access_token.clone(),
        &config.api_base,
        &config.data_api_base,
        config.http_timeout,
    )?;

    let images = ImageDirectory::new(&config.image_dir);
    info!("Saving photos to {}", images.root().display());

    let hub = DanmakuHub::default();

    let services = Services {
        messenger: Arc::new(line),
        broadcaster: Arc::new(hub.clone()),
        messages: Arc::new(MessageRepository::new(&db)),
        images: Arc::new(images),
        prints: Arc::new(PhotoRepository::new(&db)),
    };

    // Mode flags live only in this process
    let modes = ModeResolver::new(CacheConfig::mode_flags().sweep_interval(config.mode_sweep_interval));
    let sweeper = modes.spawn_sweeper();
    info!("Mode store initialized");

    let dispatcher = Dispatcher::new(modes.clone(), config.dispatch.clone(), services);
    let state = AppState {
        dispatcher,
        channel_secret: Arc::from(config.channel_secret.as_str()),
        hub,
    };

    let result = bot::run(&config, state).await;
    sweeper.abort();
    info!("Stopped with {} mode flags held", modes.entry_count());
    result
}

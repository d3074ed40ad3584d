//! Configuration module for the party bot.
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::i18n;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // LINE
    pub channel_secret: String,
    pub access_token: String,
    pub api_base: String,
    pub data_api_base: String,
    pub http_timeout: Duration,

    // HTTP server
    pub listen_port: u16,
    pub webhook_path: String,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    /// Where uploaded photos are written.
    pub image_dir: PathBuf,

    /// How often expired mode flags are reclaimed.
    pub mode_sweep_interval: Duration,

    /// Interaction behaviour.
    pub dispatch: DispatchSettings,
}

/// Settings that shape how events are dispatched.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Phrase that arms danmaku mode.
    pub danmaku_trigger: String,
    /// Phrase that arms photo mode.
    pub photo_trigger: String,
    pub danmaku_window: Duration,
    pub photo_window: Duration,
    /// Locale of user-facing replies.
    pub locale: String,
    /// Photo actions allowed to run at once.
    pub max_concurrent_photos: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            danmaku_trigger: "［愛的留言］".to_string(),
            photo_trigger: "[拍立得列印]".to_string(),
            danmaku_window: Duration::from_secs(60),
            photo_window: Duration::from_secs(300),
            locale: i18n::DEFAULT_LOCALE.to_string(),
            max_concurrent_photos: 4,
        }
    }
}

impl DispatchSettings {
    /// The danmaku phrase must match exactly.
    pub fn is_danmaku_trigger(&self, text: &str) -> bool {
        !self.danmaku_trigger.trim().is_empty() && text == self.danmaku_trigger
    }

    /// The photo phrase matches after trimming surrounding whitespace on both sides.
    pub fn is_photo_trigger(&self, text: &str) -> bool {
        let trigger = self.photo_trigger.trim();
        !trigger.is_empty() && text.trim() == trigger
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{name} must be set"))
}

fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

fn base_url(name: &str, default: &str) -> Result<String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).with_context(|| format!("{name} is not a valid URL: {raw:?}"))?;
    Ok(raw)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = DispatchSettings::default();

        let mut webhook_path = env::var("WEBHOOK_PATH").unwrap_or_else(|_| "/callback".to_string());
        if !webhook_path.starts_with('/') {
            webhook_path.insert(0, '/');
        }

        let locale = env::var("LOCALE").unwrap_or(defaults.locale);
        if !i18n::is_supported(&locale) {
            bail!("LOCALE {:?} has no translations", locale);
        }

        let max_concurrent_photos = parse_or("MAX_CONCURRENT_PHOTOS", defaults.max_concurrent_photos)?;
        if max_concurrent_photos == 0 {
            bail!("MAX_CONCURRENT_PHOTOS must be at least 1");
        }

        let dispatch = DispatchSettings {
            danmaku_trigger: env::var("DANMAKU_TRIGGER").unwrap_or(defaults.danmaku_trigger),
            photo_trigger: env::var("PHOTO_TRIGGER").unwrap_or(defaults.photo_trigger),
            danmaku_window: Duration::from_secs(parse_or("DANMAKU_WINDOW_SECS", 60)?),
            photo_window: Duration::from_secs(parse_or("PHOTO_WINDOW_SECS", 300)?),
            locale,
            max_concurrent_photos,
        };

        Ok(Self {
            channel_secret: required("LINE_CHANNEL_SECRET")?,
            access_token: required("LINE_ACCESS_TOKEN")?,
            api_base: base_url("LINE_API_BASE", "https://api.line.me")?,
            data_api_base: base_url("LINE_DATA_API_BASE", "https://api-data.line.me")?,
            http_timeout: Duration::from_secs(parse_or("HTTP_TIMEOUT_SECS", 10)?),
            listen_port: parse_or("LISTEN_PORT", 8080)?,
            webhook_path,
            mongodb_uri: required("MONGODB_URI")?,
            mongodb_database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "partybot".to_string()),
            image_dir: PathBuf::from(env::var("IMAGE_DIR").unwrap_or_else(|_| "images".to_string())),
            mode_sweep_interval: Duration::from_secs(parse_or::<u64>("MODE_SWEEP_SECS", 15)?.max(1)),
            dispatch,
        })
    }
}

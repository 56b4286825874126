use log::warn;
use std::{env, fmt, str::FromStr, time::Duration};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "TripPlanner";
const PHOTO_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";
const PHOTO_SEARCH_TIMEOUT_SECS: u64 = 10;
const PLACEHOLDER_IMAGE_URL: &str = "/images/trip-placeholder.jpg";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub photo_search: PhotoSearchConfig,
    pub placeholder_image_url: String,
}

#[derive(Debug, Clone)]
pub struct PhotoSearchConfig {
    /// Without an access key trip images always fall back to the placeholder
    pub access_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PhotoSearchConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            base_url: PHOTO_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(PHOTO_SEARCH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for everything except the database URI.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_uri = non_empty_var("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;

        Ok(Self {
            host: non_empty_var("HOST").unwrap_or_else(|| HOST.to_string()),
            port: parse_var("PORT", PORT),
            mongodb_uri,
            database: non_empty_var("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            photo_search: PhotoSearchConfig {
                access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
                base_url: non_empty_var("PHOTO_SEARCH_URL")
                    .unwrap_or_else(|| PHOTO_SEARCH_URL.to_string()),
                timeout: Duration::from_secs(parse_var(
                    "PHOTO_SEARCH_TIMEOUT_SECS",
                    PHOTO_SEARCH_TIMEOUT_SECS,
                )),
            },
            placeholder_image_url: non_empty_var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match non_empty_var(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {} value {:?} ({}), using default: {}", key, raw, e, default);
            default
        }),
        None => default,
    }
}

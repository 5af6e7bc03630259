use serde::Deserialize;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `CAMPAIGN_SENTINEL__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub direct: DirectConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Connection settings for the remote advertising platform JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// OAuth token sent in every request envelope.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Log every request envelope (token redacted).
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot holding campaign and banner strategies.
    #[serde(default = "default_strategy_path")]
    pub strategy_path: String,
}

fn default_api_url() -> String {
    "https://api-sandbox.direct.yandex.ru/live/v4/json/".to_string()
}
fn default_locale() -> String {
    "ru".to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_strategy_path() -> String {
    "strategies.json".to_string()
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: String::new(),
            locale: default_locale(),
            debug: false,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            strategy_path: default_strategy_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            direct: DirectConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then environment
    /// variables (which take precedence).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::with_name(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("CAMPAIGN_SENTINEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

use clap::Parser;
use serde::Deserialize;

use advisor::{AdvisorConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use engine::EntryKind;

use crate::error::{Result, config_error};

const DEFAULT_CONFIG_PATH: &str = "config/inflow.toml";
const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Plain environment variables read on top of the `INFLOW_*` ones, mapped to
/// their configuration keys.
const LEGACY_ENV: [(&str, &str); 6] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USERNAME", "database.username"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("APIKEY", "chat.api_key"),
];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub chat: ChatSettings,
    pub log: LogSettings,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Postgres,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: Backend,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// SQLite file, only used by the `sqlite` backend.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub file: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "inflow.log".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "inflow", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Read from a SQLite file instead of the configured database.
    #[arg(long)]
    sqlite: Option<String>,
    /// Override the chat API root (e.g. http://localhost:8000/v1).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the chat model.
    #[arg(long)]
    model: Option<String>,
    /// Ledger shown at startup.
    #[arg(long, value_parser = parse_kind)]
    kind: Option<EntryKind>,
}

fn parse_kind(value: &str) -> std::result::Result<EntryKind, String> {
    EntryKind::try_from(value)
}

impl DatabaseSettings {
    /// Connection URL for the configured backend. Credentials are
    /// percent-encoded.
    pub fn url(&self) -> Result<String> {
        match self.backend {
            Backend::Memory => Ok("sqlite::memory:".to_string()),
            Backend::Sqlite => {
                let path = required(&self.path, "database.path")?;
                Ok(format!("sqlite:{path}?mode=rwc"))
            }
            Backend::Postgres => {
                let host = required(&self.host, "database.host (DB_HOST)")?;
                let username = required(&self.username, "database.username (DB_USERNAME)")?;
                let password = required(&self.password, "database.password (DB_PASSWORD)")?;
                let name = required(&self.name, "database.name (DB_NAME)")?;
                let port = self.port.unwrap_or(DEFAULT_POSTGRES_PORT);
                if port == 0 {
                    return Err(config_error("database.port (DB_PORT) must be > 0"));
                }
                Ok(format!(
                    "postgres://{}:{}@{host}:{port}/{name}",
                    urlencoding::encode(username),
                    urlencoding::encode(password),
                ))
            }
        }
    }
}

impl ChatSettings {
    pub fn advisor_config(&self) -> Result<AdvisorConfig> {
        let api_key = required(&self.api_key, "chat.api_key (APIKEY)")?;
        Ok(AdvisorConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: api_key.to_string(),
        })
    }
}

impl AppConfig {
    /// Fail fast on settings that would only break later, mid-interaction.
    pub fn validate(&self) -> Result<()> {
        self.database.url()?;
        self.chat.advisor_config()?;
        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(config_error(format!("missing {key}"))),
    }
}

pub fn load() -> Result<AppConfig> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let settings = build(args, |key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}

/// Merge file, `INFLOW_*` environment, plain variables and CLI flags, in
/// increasing priority.
fn build(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("INFLOW")
            .prefix_separator("_")
            .separator("__"),
    );
    for (var, key) in LEGACY_ENV {
        builder = builder.set_override_option(key, env(var))?;
    }
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(path) = args.sqlite {
        settings.database.backend = Backend::Sqlite;
        settings.database.path = Some(path);
    }
    if let Some(base_url) = args.base_url {
        settings.chat.base_url = base_url;
    }
    if let Some(model) = args.model {
        settings.chat.model = model;
    }
    if let Some(kind) = args.kind {
        settings.kind = kind;
    }

    Ok(settings)
}

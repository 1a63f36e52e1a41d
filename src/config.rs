use std::env;
use std::str::FromStr;

use log::{debug, error, info};
use url::Url;

use crate::error::{BotError, Result};
use crate::types::FallbackMode;

const DEFAULT_WEBHOOK_PATH: &str = "/webhook";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub webhook_url: Url,
    pub webhook_path: String,
    pub port: u16,
    pub foursquare_api_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub default_query: Option<String>,
    pub fallback: FallbackMode,
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|e| {
        error!("Failed to load {name} from environment: {e}");
        BotError::EnvVar(e)
    })
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let telegram_token = required("TELEGRAM_BOT_TOKEN")?;

        let webhook_url = required("WEBHOOK_URL")?;
        let webhook_url = Url::parse(&webhook_url)
            .map_err(|e| BotError::Config(format!("WEBHOOK_URL is not a valid URL: {e}")))?;

        let webhook_path = normalize_webhook_path(
            optional("WEBHOOK_PATH")
                .as_deref()
                .unwrap_or(DEFAULT_WEBHOOK_PATH),
        )?;

        let port = match optional("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| BotError::Config(format!("PORT must be a port number: {e}")))?,
            None => DEFAULT_PORT,
        };

        let foursquare_api_key = required("FOURSQUARE_API_KEY")?;
        let openai_api_key = required("OPENAI_API_KEY")?;
        let openai_model =
            optional("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        let default_query = optional("DEFAULT_QUERY");

        let fallback = match optional("FALLBACK_MODE") {
            Some(mode) => FallbackMode::from_str(&mode).map_err(|_| {
                BotError::Config(format!(
                    "FALLBACK_MODE must be 'answer' or 'hint', got '{mode}'"
                ))
            })?,
            None => FallbackMode::default(),
        };

        info!("Configuration loaded successfully");
        debug!(
            "Telegram token length: {} characters",
            telegram_token.len()
        );
        debug!("Webhook: {webhook_url} (listening on {webhook_path}, port {port})");
        debug!(
            "Foursquare API key length: {} characters",
            foursquare_api_key.len()
        );
        debug!(
            "OpenAI API key length: {} characters",
            openai_api_key.len()
        );
        debug!("OpenAI model: {openai_model}");
        debug!("Default query: {default_query:?}, fallback: {fallback}");

        Ok(Self {
            telegram_token,
            webhook_url,
            webhook_path,
            port,
            foursquare_api_key,
            openai_api_key,
            openai_model,
            default_query,
            fallback,
        })
    }
}

/// Leading slash added; only plain path characters are allowed since the
/// router treats `{`, `}`, `:` and `*` as capture syntax.
fn normalize_webhook_path(path: &str) -> Result<String> {
    let trimmed = path.trim();
    let normalized = if trimmed.is_empty() {
        DEFAULT_WEBHOOK_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    let is_plain = normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~'));
    if !is_plain {
        return Err(BotError::Config(format!(
            "WEBHOOK_PATH may only contain letters, digits and '/-_.~', got '{normalized}'"
        )));
    }

    Ok(normalized)
}

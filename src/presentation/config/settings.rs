use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_SESSION_SECRET: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
    pub synthesis: SynthesisSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisSettings {
    pub response_language: String,
}

impl Settings {
    /// Defaults, then `appsettings.{env}.toml`, then `APP__SECTION__KEY`
    /// variables, then the conventional `GROQ_API_KEY`, `SESSION_SECRET`
    /// and `PORT` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default(
                "upstream.api_url",
                "https://api.groq.com/openai/v1/chat/completions",
            )?
            .set_default("upstream.timeout_secs", 30_i64)?
            .set_default("upstream.temperature", 0.7)?
            .set_default("upstream.max_tokens", 1000_i64)?
            .set_default("session.secret", DEFAULT_SESSION_SECRET)?
            .set_default("logging.level", "info,chatbridge=debug,tower_http=debug")?
            .set_default("logging.json_format", false)?
            .set_default("synthesis.response_language", "English")?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            builder = builder.set_override("upstream.api_key", api_key)?;
        }
        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            builder = builder.set_override("session.secret", secret)?;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()) {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}

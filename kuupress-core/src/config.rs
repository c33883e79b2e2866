use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

use thiserror::Error;

use kuupress_api::ClientOptions;
use kuupress_api::client::{DEFAULT_CACHE_TTL, DEFAULT_HTTP_TIMEOUT, DEFAULT_RETRIES};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable `{0}` is not set")]
    Missing(&'static str),
    #[error("environment variable `{var}` has an invalid value `{value}`")]
    Invalid { var: &'static str, value: String },
}

/// Guilds allowed to use the bot. An empty list accepts every guild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuildAllowList {
    guilds: BTreeSet<u64>,
}

impl GuildAllowList {
    pub fn new(guilds: impl IntoIterator<Item = u64>) -> Self {
        Self {
            guilds: guilds.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.guilds.len()
    }

    /// Interactions from outside any guild (DMs) are never accepted.
    pub fn allows(&self, guild_id: Option<u64>) -> bool {
        let Some(guild_id) = guild_id else {
            return false;
        };

        self.guilds.is_empty() || self.guilds.contains(&guild_id)
    }
}

/// Process-wide configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub discord_token: String,
    pub client_id: Option<u64>,
    pub guild_ids: Vec<u64>,
    pub api_base: Option<String>,
    pub site_base: Option<String>,
    pub allowed_guilds: GuildAllowList,
    pub ephemeral_replies: bool,
    pub register_commands: bool,
    pub client_options: ClientOptions,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let discord_token = var("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let client_id = match var("DISCORD_CLIENT_ID") {
            Some(raw) => Some(parse_id("DISCORD_CLIENT_ID", &raw)?),
            None => None,
        };

        let mut guild_ids = parse_id_list("DISCORD_GUILD_ID", var("DISCORD_GUILD_ID"))?;
        for id in parse_id_list("DISCORD_GUILD_IDS", var("DISCORD_GUILD_IDS"))? {
            if !guild_ids.contains(&id) {
                guild_ids.push(id);
            }
        }

        let allowed_guilds = GuildAllowList::new(parse_id_list(
            "ALLOWED_GUILD_IDS",
            var("ALLOWED_GUILD_IDS"),
        )?);

        let api_base = var("KUUPRESS_API_BASE");
        let site_base = var("KUUPRESS_SITE_BASE").or_else(|| api_base.clone());

        let client_options = ClientOptions {
            timeout: Duration::from_secs(parse_u64(
                "KUUPRESS_HTTP_TIMEOUT_SECONDS",
                var("KUUPRESS_HTTP_TIMEOUT_SECONDS"),
                DEFAULT_HTTP_TIMEOUT.as_secs(),
            )?),
            retries: parse_u64(
                "KUUPRESS_API_RETRIES",
                var("KUUPRESS_API_RETRIES"),
                u64::from(DEFAULT_RETRIES),
            )?
            .min(u64::from(u32::MAX)) as u32,
            cache_ttl: Duration::from_secs(parse_u64(
                "KUUPRESS_CACHE_TTL_SECONDS",
                var("KUUPRESS_CACHE_TTL_SECONDS"),
                DEFAULT_CACHE_TTL.as_secs(),
            )?),
            ..Default::default()
        };

        Ok(Self {
            discord_token,
            client_id,
            guild_ids,
            api_base,
            site_base,
            allowed_guilds,
            ephemeral_replies: parse_bool(var("KUUPRESS_EPHEMERAL"), true),
            register_commands: parse_bool(var("REGISTER_COMMANDS"), true),
            client_options,
        })
    }
}

fn parse_id(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ConfigError::Invalid {
            var,
            value: raw.to_owned(),
        })
}

fn parse_id_list(var: &'static str, raw: Option<String>) -> Result<Vec<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(var, part))
        .collect()
}

fn parse_u64(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        Some(value) => value
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

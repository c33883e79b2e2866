pub mod config;

use std::sync::Arc;

use kuupress_api::ApiClient;

pub use config::{BotConfig, ConfigError, GuildAllowList};

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub config: Arc<BotConfig>,
    pub api: ApiClient,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

mod events;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use kuupress_api::ApiClient;
use kuupress_core::{BotConfig, Data, Error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;

    if config.allowed_guilds.is_empty() {
        warn!("ALLOWED_GUILD_IDS is empty; accepting interactions from every guild.");
    } else {
        info!(
            allowed_guilds = config.allowed_guilds.len(),
            "Guild allow-list enabled."
        );
    }

    let api = ApiClient::new(config.api_base.as_deref(), config.client_options.clone())?;
    if api.is_configured() {
        info!(
            timeout_secs = config.client_options.timeout.as_secs(),
            retries = config.client_options.retries,
            page_cache = api.cache().is_enabled(),
            "Kuupress API client ready."
        );
    } else {
        warn!("KUUPRESS_API_BASE is not set; /rank and /user will report a configuration error.");
    }

    let intents = serenity::GatewayIntents::GUILDS;
    let token = config.discord_token.clone();
    let client_id = config.client_id;
    let config = Arc::new(config);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: kuupress_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("Kuupress bot is online.");

                if config.register_commands {
                    register_commands(ctx, &framework.options().commands, &config.guild_ids)
                        .await?;
                } else {
                    info!("Command registration disabled (set REGISTER_COMMANDS=true to enable).");
                }

                Ok(Data { config, api })
            })
        })
        .build();

    info!("Kuupress bot is connecting...");

    let mut builder = serenity::ClientBuilder::new(token, intents).framework(framework);
    if let Some(client_id) = client_id {
        builder = builder.application_id(serenity::ApplicationId::new(client_id));
    }

    let mut client = builder.await?;
    client.start().await?;
    Ok(())
}

/// Register the slash commands in every configured guild, or globally when
/// none are configured. Registering again overwrites earlier definitions.
async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<Data, Error>],
    guild_ids: &[u64],
) -> Result<(), Error> {
    if guild_ids.is_empty() {
        poise::builtins::register_globally(ctx, commands).await?;
        info!("Registered commands globally.");
        return Ok(());
    }

    for guild_id in guild_ids {
        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(*guild_id))
            .await?;
        info!(guild_id, "Registered commands in guild.");
    }

    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(kuupress_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let description = match input {
                Some(input) => format!("Invalid argument: `{}`", input),
                None => "Missing required argument.".to_owned(),
            };

            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .ephemeral(true)
                        .content(description),
                )
                .await;
        }
        poise::FrameworkError::GuildOnly { ctx, .. } => {
            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .ephemeral(true)
                        .content("This command can only be used in a server."),
                )
                .await;
        }
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            debug!(command = %interaction.data.name, "unknown command interaction");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        events::interactions::handle_interaction_create(ctx, data, interaction).await;
    }

    Ok(())
}

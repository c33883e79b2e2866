use kuupress_core::{Context, Error};

use crate::dispatch::run_command;
use crate::router::Invocation;

/// Show a Kuupress reader's profile.
#[poise::command(slash_command, guild_only, category = "Kuupress")]
pub async fn user(
    ctx: Context<'_>,
    #[description = "Kuupress username"] username: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().map(|id| id.get());
    run_command(ctx, &Invocation::command(guild_id, "user", Some(username.as_str()))).await
}

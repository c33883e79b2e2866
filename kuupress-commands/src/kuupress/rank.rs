use kuupress_core::{Context, Error};

use crate::dispatch::run_command;
use crate::router::Invocation;

/// Show the Kuupress leaderboard.
#[poise::command(slash_command, guild_only, category = "Kuupress")]
pub async fn rank(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().map(|id| id.get());
    run_command(ctx, &Invocation::command(guild_id, "rank", None)).await
}

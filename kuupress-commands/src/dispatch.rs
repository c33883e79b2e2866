//! Thin I/O layer: acknowledges interactions, runs the handler and delivers
//! its reply through Discord.

use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use kuupress_core::{Context, Data, Error};

use crate::kuupress::execute;
use crate::router::{Action, Invocation, route};

/// How an action is answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponsePlan {
    /// Defer before the remote API is called.
    pub acknowledge_first: bool,
    pub ephemeral: bool,
}

/// Lookups acknowledge first and follow the configured visibility; local
/// answers (rejections, usage hints) are immediate and only for the invoker.
pub fn response_plan(action: &Action, ephemeral_replies: bool) -> ResponsePlan {
    let acknowledge_first = action.needs_fetch();
    ResponsePlan {
        acknowledge_first,
        ephemeral: ephemeral_replies || !acknowledge_first,
    }
}

/// Entry point shared by the slash commands.
pub async fn run_command(ctx: Context<'_>, invocation: &Invocation<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let action = route(&data.config.allowed_guilds, invocation);
    let plan = response_plan(&action, data.config.ephemeral_replies);

    if plan.acknowledge_first {
        let deferred = if plan.ephemeral {
            ctx.defer_ephemeral().await
        } else {
            ctx.defer().await
        };
        if let Err(err) = deferred {
            warn!(?err, ?action, "failed to acknowledge command; interaction likely expired");
            return Ok(());
        }
    }

    let Some(reply) = execute(&data.api, data.config.site_base.as_deref(), &action).await else {
        debug!(?invocation, "command routed to nothing");
        return Ok(());
    };

    if let Err(err) = ctx.send(reply.into_create_reply(plan.ephemeral)).await {
        warn!(?err, ?action, "failed to deliver command reply");
    }

    Ok(())
}

/// Button presses on leaderboard messages.
pub async fn handle_component(
    ctx: &serenity::Context,
    data: &Data,
    component: &serenity::ComponentInteraction,
) -> Result<(), Error> {
    let guild_id = component.guild_id.map(|id| id.get());
    let invocation = Invocation::button(guild_id, &component.data.custom_id);
    let action = route(&data.config.allowed_guilds, &invocation);

    if matches!(action, Action::Ignore) {
        debug!(custom_id = %component.data.custom_id, "ignoring unknown component");
        return Ok(());
    }

    let plan = response_plan(&action, true);
    if plan.acknowledge_first {
        if let Err(err) = component
            .create_response(ctx, serenity::CreateInteractionResponse::Acknowledge)
            .await
        {
            warn!(?err, ?action, "failed to acknowledge button press; interaction likely expired");
            return Ok(());
        }
    }

    let Some(reply) = execute(&data.api, data.config.site_base.as_deref(), &action).await else {
        return Ok(());
    };

    if plan.acknowledge_first {
        if let Err(err) = component
            .edit_response(ctx, reply.into_edit_response())
            .await
        {
            warn!(?err, ?action, "failed to update leaderboard message");
        }
        return Ok(());
    }

    let message = reply.into_response_message(plan.ephemeral);
    if let Err(err) = component
        .create_response(ctx, serenity::CreateInteractionResponse::Message(message))
        .await
    {
        warn!(?err, ?action, "failed to answer button press");
    }

    Ok(())
}

use poise::serenity_prelude as serenity;
use tracing::error;

use kuupress_commands::dispatch::handle_component;
use kuupress_core::Data;

/// Route component interactions (page buttons) to the command layer. Slash
/// commands are handled by the poise framework itself.
pub async fn handle_interaction_create(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::Interaction,
) {
    let serenity::Interaction::Component(component) = interaction else {
        return;
    };

    if let Err(err) = handle_component(ctx, data, component).await {
        error!(
            ?err,
            custom_id = %component.data.custom_id,
            "failed to handle component interaction"
        );
    }
}

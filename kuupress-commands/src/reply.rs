//! What a handler wants to show, and its conversion into serenity builders.

use poise::serenity_prelude as serenity;

use kuupress_utils::embed::build_embed;
use kuupress_utils::pagination::PageButton;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbedView {
    pub title: String,
    pub description: String,
    pub footer: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub timestamp: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Embed {
        embed: EmbedView,
        buttons: Vec<PageButton>,
    },
    /// Plain text. Replaces any embed and removes all buttons.
    Notice(String),
}

impl Reply {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    pub fn embed(&self) -> Option<&EmbedView> {
        match self {
            Self::Embed { embed, .. } => Some(embed),
            Self::Notice(_) => None,
        }
    }

    pub fn buttons(&self) -> &[PageButton] {
        match self {
            Self::Embed { buttons, .. } => buttons,
            Self::Notice(_) => &[],
        }
    }

    fn create_embed(&self) -> Option<serenity::CreateEmbed> {
        let view = self.embed()?;
        let mut embed = build_embed(&view.title, view.description.clone(), view.footer.as_deref());

        if let Some(url) = &view.url {
            embed = embed.url(url);
        }
        if let Some(thumbnail) = &view.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if view.timestamp {
            embed = embed.timestamp(serenity::Timestamp::now());
        }

        Some(embed)
    }

    fn components(&self) -> Vec<serenity::CreateActionRow> {
        let buttons = self.buttons();
        if buttons.is_empty() {
            return Vec::new();
        }

        vec![serenity::CreateActionRow::Buttons(
            buttons
                .iter()
                .map(|button| {
                    serenity::CreateButton::new(button.custom_id())
                        .label(button.label())
                        .style(serenity::ButtonStyle::Secondary)
                })
                .collect(),
        )]
    }

    /// Reply to a slash command (initial response or after a defer).
    pub fn into_create_reply(self, ephemeral: bool) -> poise::CreateReply {
        let components = self.components();
        let reply = poise::CreateReply::default()
            .ephemeral(ephemeral)
            .components(components);

        match self.create_embed() {
            Some(embed) => reply.embed(embed),
            None => match self {
                Self::Notice(text) => reply.content(text),
                Self::Embed { .. } => reply,
            },
        }
    }

    /// Fresh interaction response, for answers that need no acknowledgement.
    pub fn into_response_message(
        self,
        ephemeral: bool,
    ) -> serenity::CreateInteractionResponseMessage {
        let components = self.components();
        let message = serenity::CreateInteractionResponseMessage::new()
            .ephemeral(ephemeral)
            .components(components);

        match self.create_embed() {
            Some(embed) => message.embed(embed),
            None => match self {
                Self::Notice(text) => message.content(text),
                Self::Embed { .. } => message,
            },
        }
    }

    /// Replace the message a button press came from.
    pub fn into_edit_response(self) -> serenity::EditInteractionResponse {
        let components = self.components();
        let edit = serenity::EditInteractionResponse::new().components(components);

        match self.create_embed() {
            Some(embed) => edit.content("").embeds(vec![embed]),
            None => match self {
                Self::Notice(text) => edit.content(text).embeds(Vec::new()),
                Self::Embed { .. } => edit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use kuupress_utils::pagination::{PageButton, PageDirection};
    use serde_json::json;

    use super::*;

    /// Discord's EPHEMERAL message flag.
    const EPHEMERAL_FLAG: u64 = 1 << 6;

    fn next(page: u32) -> PageButton {
        PageButton {
            direction: PageDirection::Next,
            target_page: page,
        }
    }

    #[test]
    fn notices_carry_no_buttons_or_embed() {
        let reply = Reply::notice("No more pages.");
        assert!(reply.embed().is_none());
        assert!(reply.buttons().is_empty());
        assert!(reply.components().is_empty());
    }

    #[test]
    fn buttons_share_one_action_row() {
        let reply = Reply::Embed {
            embed: EmbedView {
                title: "t".to_owned(),
                description: "d".to_owned(),
                ..Default::default()
            },
            buttons: vec![
                PageButton {
                    direction: PageDirection::Previous,
                    target_page: 1,
                },
                next(3),
            ],
        };

        assert_eq!(reply.components().len(), 1);
        assert!(reply.create_embed().is_some());
    }

    #[test]
    fn notice_reply_is_plain_ephemeral_text() {
        let reply = Reply::notice("This bot is not enabled in this server.").into_create_reply(true);

        assert_eq!(reply.ephemeral, Some(true));
        assert_eq!(
            reply.content.as_deref(),
            Some("This bot is not enabled in this server.")
        );
        assert!(reply.embeds.is_empty());
        assert_eq!(reply.components.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn embed_reply_carries_buttons() {
        let reply = Reply::Embed {
            embed: EmbedView {
                title: "t".to_owned(),
                description: "d".to_owned(),
                ..Default::default()
            },
            buttons: vec![next(2)],
        }
        .into_create_reply(false);

        assert_eq!(reply.ephemeral, Some(false));
        assert!(reply.content.is_none());
        assert_eq!(reply.embeds.len(), 1);
        assert_eq!(reply.components.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn notice_edit_strips_embeds_and_buttons() {
        let edit = Reply::notice("No more pages.").into_edit_response();
        let value = serde_json::to_value(&edit).unwrap();

        assert_eq!(value["content"], json!("No more pages."));
        assert_eq!(value["embeds"], json!([]));
        assert_eq!(value["components"], json!([]));
    }

    #[test]
    fn embed_edit_replaces_content_and_keeps_buttons() {
        let edit = Reply::Embed {
            embed: EmbedView {
                title: "🏆 Kuupress Leaderboard".to_owned(),
                description: "🥇 **Aki** — Lv 10 • 12,345 XP".to_owned(),
                ..Default::default()
            },
            buttons: vec![next(3)],
        }
        .into_edit_response();
        let value = serde_json::to_value(&edit).unwrap();

        assert_eq!(value["content"], json!(""));
        assert_eq!(value["embeds"][0]["title"], json!("🏆 Kuupress Leaderboard"));
        assert_eq!(value["components"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn local_button_answer_is_ephemeral() {
        let message = Reply::notice("This bot is not enabled in this server.")
            .into_response_message(true);
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value["content"],
            json!("This bot is not enabled in this server.")
        );
        assert_eq!(value["flags"].as_u64(), Some(EPHEMERAL_FLAG));
        assert_eq!(value["components"], json!([]));
    }
}

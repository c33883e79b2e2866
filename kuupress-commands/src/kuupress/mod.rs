//! Leaderboard and profile handlers.
//!
//! Handlers never fail: every API error is logged and turned into a short
//! notice for the user.

pub mod embeds;
pub mod rank;
pub mod user;

use tracing::{error, warn};

use kuupress_api::{ApiError, LeaderboardSource};
use kuupress_utils::embed::page_footer;
use kuupress_utils::formatting::{profile_title, render_leaderboard, render_profile};
use kuupress_utils::pagination::{current_page, page_buttons};

use crate::reply::{EmbedView, Reply};
use crate::router::Action;
use embeds::{
    LEADERBOARD_FAILED_MESSAGE, LEADERBOARD_TITLE, MISSING_USERNAME_MESSAGE,
    NO_MORE_PAGES_MESSAGE, NO_RANKED_USERS_MESSAGE, NOT_CONFIGURED_MESSAGE,
    PROFILE_UNAVAILABLE_MESSAGE, REJECTED_GUILD_MESSAGE, profile_link,
};

/// Where a leaderboard request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Command,
    Button,
}

/// Produce the reply for a routed action. `None` means nothing is sent.
pub async fn execute<S>(source: &S, site_base: Option<&str>, action: &Action) -> Option<Reply>
where
    S: LeaderboardSource,
{
    match action {
        Action::Reject => Some(Reply::notice(REJECTED_GUILD_MESSAGE)),
        Action::MissingUsername => Some(Reply::notice(MISSING_USERNAME_MESSAGE)),
        Action::ShowLeaderboard { page } => {
            Some(leaderboard_reply(source, *page, Origin::Command).await)
        }
        Action::TurnPage { page } => Some(leaderboard_reply(source, *page, Origin::Button).await),
        Action::ShowProfile { username } => {
            Some(profile_reply(source, username, site_base).await)
        }
        Action::Ignore => None,
    }
}

pub async fn leaderboard_reply<S>(source: &S, page: u32, origin: Origin) -> Reply
where
    S: LeaderboardSource,
{
    let board = match source.fetch_leaderboard(page).await {
        Ok(board) => board,
        Err(err) => {
            error!(?err, page, "failed to fetch leaderboard");
            return Reply::notice(failure_message(&err, LEADERBOARD_FAILED_MESSAGE));
        }
    };

    if board.entries.is_empty() {
        return match origin {
            Origin::Button if page > 1 => Reply::notice(NO_MORE_PAGES_MESSAGE),
            _ => Reply::notice(NO_RANKED_USERS_MESSAGE),
        };
    }

    let shown_page = current_page(page, &board.meta);
    Reply::Embed {
        embed: EmbedView {
            title: LEADERBOARD_TITLE.to_owned(),
            description: render_leaderboard(&board.entries),
            footer: Some(page_footer(
                shown_page,
                board.meta.last_page,
                board.meta.total,
            )),
            timestamp: true,
            ..Default::default()
        },
        buttons: page_buttons(page, &board.meta),
    }
}

pub async fn profile_reply<S>(source: &S, username: &str, site_base: Option<&str>) -> Reply
where
    S: LeaderboardSource,
{
    let profile = match source.fetch_profile(username).await {
        Ok(profile) => profile,
        Err(err @ ApiError::NotFound { .. }) => {
            warn!(?err, username, "profile lookup found nobody");
            return Reply::notice(PROFILE_UNAVAILABLE_MESSAGE);
        }
        Err(err) => {
            error!(?err, username, "failed to fetch profile");
            return Reply::notice(failure_message(&err, PROFILE_UNAVAILABLE_MESSAGE));
        }
    };

    let link = profile_link(site_base, &profile.username);
    Reply::Embed {
        embed: EmbedView {
            title: profile_title(&profile),
            description: render_profile(&profile, link.as_deref()),
            url: link,
            thumbnail: profile.avatar_url.clone(),
            ..Default::default()
        },
        buttons: Vec::new(),
    }
}

fn failure_message(err: &ApiError, fallback: &'static str) -> &'static str {
    if err.is_config() {
        NOT_CONFIGURED_MESSAGE
    } else {
        fallback
    }
}

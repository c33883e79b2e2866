use kuupress_api::url::{parse_base_url, profile_page_url};

pub const LEADERBOARD_TITLE: &str = "🏆 Kuupress Leaderboard";

pub const REJECTED_GUILD_MESSAGE: &str = "This bot is not enabled in this server.";
pub const MISSING_USERNAME_MESSAGE: &str = "Please provide a username.";
pub const NO_RANKED_USERS_MESSAGE: &str = "No ranked users yet. 📉";
pub const NO_MORE_PAGES_MESSAGE: &str = "No more pages.";
pub const LEADERBOARD_FAILED_MESSAGE: &str = "Failed to fetch leaderboard from Kuupress. 😢";
pub const PROFILE_UNAVAILABLE_MESSAGE: &str = "User not found or unavailable.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Kuupress API is not configured. Please contact the bot operator.";

/// Link to the public profile page, when a site base is configured.
pub fn profile_link(site_base: Option<&str>, username: &str) -> Option<String> {
    let site = parse_base_url(site_base?).ok()??;
    profile_page_url(&site, username)
        .ok()
        .map(|url| url.to_string())
}

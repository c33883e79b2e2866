use reqwest::Url;

use crate::error::ApiError;

const LEADERBOARD_PATH: [&str; 3] = ["api", "public", "leaderboard"];
const PROFILE_PATH: [&str; 3] = ["api", "public", "profile"];

/// Parse a configured base URL. Trailing slashes are ignored and a blank value
/// means "not configured".
pub fn parse_base_url(raw: &str) -> Result<Option<Url>, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("invalid base URL `{trimmed}`: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!(
            "base URL `{trimmed}` cannot carry a path"
        )));
    }

    Ok(Some(url))
}

fn join_segments<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ApiError::Config(format!("base URL `{base}` cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `{base}/api/public/leaderboard?page={page}`
pub fn leaderboard_url(base: &Url, page: u32) -> Result<Url, ApiError> {
    let mut url = join_segments(base, LEADERBOARD_PATH)?;
    url.query_pairs_mut()
        .append_pair("page", &page.max(1).to_string());
    Ok(url)
}

/// `.` and `..` collapse into the parent path instead of naming a profile.
fn username_segment(username: &str) -> Result<&str, ApiError> {
    match username {
        "" | "." | ".." => Err(ApiError::NotFound {
            username: username.to_owned(),
        }),
        segment => Ok(segment),
    }
}

/// `{base}/api/public/profile/{username}` with the username encoded as a
/// single path segment.
pub fn profile_url(base: &Url, username: &str) -> Result<Url, ApiError> {
    let username = username_segment(username)?;
    join_segments(base, PROFILE_PATH.into_iter().chain([username]))
}

/// Public profile page on the Kuupress site.
pub fn profile_page_url(site: &Url, username: &str) -> Result<Url, ApiError> {
    let username = username_segment(username)?;
    join_segments(site, ["profile", username])
}

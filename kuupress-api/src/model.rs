//! Response models for the public Kuupress API.
//!
//! The wire structs mirror the JSON loosely; every optional or aliased field is
//! resolved once here so that rendering never has to deal with fallbacks.

use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

/// One row of the public leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: Option<u64>,
    pub display_name: String,
    pub level: u64,
    pub total_xp: u64,
}

/// Pagination metadata reported alongside a leaderboard page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub meta: PageMeta,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub chapters_read: u64,
    pub novels_followed: u64,
}

/// A single reader profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub display_name: Option<String>,
    pub level: u64,
    pub xp: u64,
    pub global_rank: Option<u64>,
    pub stats: ProfileStats,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    #[serde(default)]
    data: Option<Vec<WireEntry>>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    #[serde(default, deserialize_with = "lenient_u64")]
    rank: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    level: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    total_xp: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    data: WireProfile,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    username: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    level: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    total_xp: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    current_exp: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    global_rank: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    rank: Option<u64>,
    #[serde(default)]
    stats: Option<WireStats>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireStats {
    #[serde(default, deserialize_with = "lenient_u64")]
    chapters_read: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    novels_followed: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

/// Counters sometimes arrive as strings or floats (aggregates); negative or
/// unparsable values count as absent.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LenientNumber>::deserialize(deserializer)? {
        Some(LenientNumber::Int(value)) => Some(value),
        Some(LenientNumber::Float(value)) if value.is_finite() && value >= 0.0 => {
            Some(value.trunc() as u64)
        }
        Some(LenientNumber::Text(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(value)
}

/// Treat blank strings the same as a missing field.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Ranks are positive; anything else is reported as unranked.
fn positive(rank: Option<u64>) -> Option<u64> {
    rank.filter(|rank| *rank > 0)
}

impl From<WireEntry> for LeaderboardEntry {
    fn from(wire: WireEntry) -> Self {
        let display_name = non_blank(wire.name)
            .or_else(|| non_blank(wire.username))
            .unwrap_or_else(|| "Unknown".to_owned());

        Self {
            rank: positive(wire.rank),
            display_name,
            level: wire.level.unwrap_or(1).max(1),
            total_xp: wire.total_xp.unwrap_or(0),
        }
    }
}

impl From<WireProfile> for Profile {
    fn from(wire: WireProfile) -> Self {
        let stats = wire.stats.unwrap_or_default();

        Self {
            username: wire.username,
            display_name: non_blank(wire.display_name).or_else(|| non_blank(wire.name)),
            level: wire.level.unwrap_or(1).max(1),
            xp: wire.total_xp.or(wire.current_exp).unwrap_or(0),
            global_rank: positive(wire.global_rank.or(wire.rank)),
            stats: ProfileStats {
                chapters_read: stats.chapters_read.unwrap_or(0),
                novels_followed: stats.novels_followed.unwrap_or(0),
            },
            avatar_url: non_blank(wire.avatar).or_else(|| non_blank(wire.avatar_url)),
        }
    }
}

/// Decode a `GET /api/public/leaderboard` body.
pub fn decode_leaderboard(body: &[u8]) -> Result<LeaderboardPage, ApiError> {
    let response: LeaderboardResponse = serde_json::from_slice(body)?;

    Ok(LeaderboardPage {
        entries: response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(LeaderboardEntry::from)
            .collect(),
        meta: response.meta.unwrap_or_default(),
    })
}

/// Decode a `GET /api/public/profile/{username}` body.
pub fn decode_profile(body: &[u8]) -> Result<Profile, ApiError> {
    let response: ProfileResponse = serde_json::from_slice(body)?;
    Ok(response.data.into())
}

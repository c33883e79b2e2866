//! Client for the public Kuupress leaderboard and profile API.

pub mod cache;
pub mod client;
pub mod error;
pub mod model;
pub mod url;

pub use client::{ApiClient, ClientOptions, LeaderboardSource};
pub use error::ApiError;
pub use model::{LeaderboardEntry, LeaderboardPage, PageMeta, Profile, ProfileStats};

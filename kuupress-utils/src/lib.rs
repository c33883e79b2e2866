/// Embed builders and footer text shared across commands.
pub mod embed;
/// Pure rendering of leaderboard rows and profile cards.
pub mod formatting;
/// Page button identifiers and which buttons a page gets.
pub mod pagination;

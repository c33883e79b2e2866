use kuupress_api::{LeaderboardEntry, Profile};
use num_format::{Locale, ToFormattedString};

/// Width of the name column, in characters.
pub const NAME_WIDTH: usize = 16;
/// Marker appended to truncated names.
pub const ELLIPSIS: char = '…';
/// Rows rendered for a single leaderboard page.
pub const MAX_LEADERBOARD_ROWS: usize = 10;

/// Where a rank is being shown; decides the token used for a missing rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankContext {
    Leaderboard,
    Profile,
}

impl RankContext {
    pub fn unranked(self) -> &'static str {
        match self {
            Self::Leaderboard => "#?",
            Self::Profile => "Unranked",
        }
    }
}

/// Medal glyph for the podium, `#N` for everybody else.
pub fn medal(rank: Option<u64>, context: RankContext) -> String {
    match rank {
        Some(1) => "🥇".to_owned(),
        Some(2) => "🥈".to_owned(),
        Some(3) => "🥉".to_owned(),
        Some(rank) if rank > 0 => format!("#{}", rank),
        _ => context.unranked().to_owned(),
    }
}

/// Format an integer with comma thousands separators (12345 -> "12,345").
pub fn format_thousands(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Collapse line breaks and cut names longer than [`NAME_WIDTH`] so they end
/// in [`ELLIPSIS`] and occupy exactly the column width.
pub fn truncate_name(name: &str) -> String {
    let name = name.trim().replace(['\n', '\r'], " ");
    if name.chars().count() <= NAME_WIDTH {
        return name;
    }

    let mut out: String = name.chars().take(NAME_WIDTH - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// One leaderboard row: `🥇 **Aki** — Lv 10 • 12,345 XP`.
pub fn leaderboard_line(entry: &LeaderboardEntry) -> String {
    format!(
        "{} **{}** — Lv {} • {} XP",
        medal(entry.rank, RankContext::Leaderboard),
        truncate_name(&entry.display_name),
        entry.level,
        format_thousands(entry.total_xp)
    )
}

/// Render up to [`MAX_LEADERBOARD_ROWS`] rows, one per line. Callers handle the
/// empty case before getting here.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .take(MAX_LEADERBOARD_ROWS)
        .map(leaderboard_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Embed title for a profile card.
pub fn profile_title(profile: &Profile) -> String {
    match profile.display_name.as_deref() {
        Some(name) if name != profile.username => {
            format!("📖 {} (@{})", truncate_name(name), profile.username)
        }
        _ => format!("📖 {}", profile.username),
    }
}

pub fn render_profile(profile: &Profile, link: Option<&str>) -> String {
    let mut lines = vec![
        format!("**Username:** @{}", profile.username),
        format!("**Level:** {}", profile.level),
        format!("**XP:** {}", format_thousands(profile.xp)),
        format!(
            "**Rank:** {}",
            medal(profile.global_rank, RankContext::Profile)
        ),
        format!(
            "**Chapters read:** {}",
            format_thousands(profile.stats.chapters_read)
        ),
        format!(
            "**Novels followed:** {}",
            format_thousands(profile.stats.novels_followed)
        ),
    ];

    if let Some(link) = link {
        lines.push(String::new());
        lines.push(format!("[View profile on Kuupress]({})", link));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use kuupress_api::{LeaderboardEntry, Profile, ProfileStats};

    use super::*;

    fn entry(rank: Option<u64>, name: &str, level: u64, xp: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            display_name: name.to_owned(),
            level,
            total_xp: xp,
        }
    }

    fn profile() -> Profile {
        Profile {
            username: "aki".to_owned(),
            display_name: None,
            level: 4,
            xp: 500,
            global_rank: None,
            stats: ProfileStats::default(),
            avatar_url: None,
        }
    }

    #[test]
    fn medals_cover_podium_and_fallbacks() {
        for context in [RankContext::Leaderboard, RankContext::Profile] {
            assert_eq!(medal(Some(1), context), "🥇");
            assert_eq!(medal(Some(2), context), "🥈");
            assert_eq!(medal(Some(3), context), "🥉");
            assert_eq!(medal(Some(4), context), "#4");
            assert_eq!(medal(Some(1234), context), "#1234");
        }

        assert_eq!(medal(None, RankContext::Leaderboard), "#?");
        assert_eq!(medal(None, RankContext::Profile), "Unranked");
        assert_eq!(medal(Some(0), RankContext::Profile), "Unranked");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn long_names_fill_the_column_exactly() {
        let long = "Supercalifragilistic";
        let cut = truncate_name(long);
        assert_eq!(cut.chars().count(), NAME_WIDTH);
        assert!(cut.ends_with(ELLIPSIS));
        assert!(cut.starts_with("Supercalifragil"));

        let wide = "読書家読書家読書家読書家読書家読書家";
        let cut = truncate_name(wide);
        assert_eq!(cut.chars().count(), NAME_WIDTH);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn short_names_are_preserved() {
        assert_eq!(truncate_name("Aki"), "Aki");
        assert_eq!(truncate_name("exactly16chars!!"), "exactly16chars!!");
        assert_eq!(truncate_name("two\nlines"), "two lines");
    }

    #[test]
    fn leaderboard_rows_are_single_line() {
        let rendered = render_leaderboard(&[
            entry(Some(1), "Aki", 10, 12345),
            entry(Some(7), "Bo", 2, 80),
            entry(None, "Cy", 1, 0),
        ]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "🥇 **Aki** — Lv 10 • 12,345 XP");
        assert_eq!(lines[1], "#7 **Bo** — Lv 2 • 80 XP");
        assert_eq!(lines[2], "#? **Cy** — Lv 1 • 0 XP");
    }

    #[test]
    fn leaderboard_is_capped() {
        let entries: Vec<_> = (1..=25)
            .map(|rank| entry(Some(rank), "reader", 1, rank * 10))
            .collect();
        assert_eq!(
            render_leaderboard(&entries).lines().count(),
            MAX_LEADERBOARD_ROWS
        );
    }

    #[test]
    fn profile_uses_profile_fallbacks() {
        let rendered = render_profile(&profile(), Some("https://kuupress.test/profile/aki"));

        assert!(rendered.contains("**Username:** @aki"));
        assert!(rendered.contains("**Level:** 4"));
        assert!(rendered.contains("**XP:** 500"));
        assert!(rendered.contains("**Rank:** Unranked"));
        assert!(rendered.contains("**Chapters read:** 0"));
        assert!(rendered.contains("**Novels followed:** 0"));
        assert!(rendered.ends_with("(https://kuupress.test/profile/aki)"));
    }

    #[test]
    fn profile_without_link() {
        let mut ranked = profile();
        ranked.global_rank = Some(2);
        ranked.xp = 1_500_000;

        let rendered = render_profile(&ranked, None);
        assert!(rendered.contains("**Rank:** 🥈"));
        assert!(rendered.contains("**XP:** 1,500,000"));
        assert!(!rendered.contains("View profile"));
    }

    #[test]
    fn profile_title_mentions_handle_when_names_differ() {
        let mut named = profile();
        assert_eq!(profile_title(&named), "📖 aki");

        named.display_name = Some("Akira".to_owned());
        assert_eq!(profile_title(&named), "📖 Akira (@aki)");
    }
}

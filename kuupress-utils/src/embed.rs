use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0xE8_8D_3F;

/// Footer text for a leaderboard page (e.g. "Page 1 of 2 • 20 readers").
pub fn page_footer(page: u32, last_page: Option<u32>, total: Option<u64>) -> String {
    let page = page.max(1);
    let last_page = last_page.unwrap_or(page).max(page);
    let base = format!("Page {} of {}", page, last_page);

    match total {
        Some(1) => format!("{} • 1 reader", base),
        Some(total) => format!(
            "{} • {} readers",
            base,
            crate::formatting::format_thousands(total)
        ),
        None => base,
    }
}

/// Build a standard embed with consistent styling.
pub fn build_embed(
    title: &str,
    description: impl Into<String>,
    footer: Option<&str>,
) -> serenity::CreateEmbed {
    let builder = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    match footer {
        Some(text) if !text.is_empty() => {
            builder.footer(serenity::CreateEmbedFooter::new(text.to_owned()))
        }
        _ => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::page_footer;

    #[test]
    fn footer_reports_page_and_total() {
        assert_eq!(page_footer(1, Some(2), Some(20)), "Page 1 of 2 • 20 readers");
        assert_eq!(page_footer(1, Some(1), Some(1)), "Page 1 of 1 • 1 reader");
        assert_eq!(page_footer(3, None, None), "Page 3 of 3");
        assert_eq!(page_footer(0, Some(0), Some(12345)), "Page 1 of 1 • 12,345 readers");
    }
}

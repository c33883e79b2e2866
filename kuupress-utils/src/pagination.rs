use kuupress_api::PageMeta;

/// Custom-id prefix of the leaderboard page buttons; the target page follows
/// as a decimal integer.
pub const PAGE_BUTTON_PREFIX: &str = "kuupress_lb:";

pub fn page_button_id(page: u32) -> String {
    format!("{}{}", PAGE_BUTTON_PREFIX, page)
}

/// `None` when the id is not a page button. An unparsable page means page 1.
pub fn parse_page_button(custom_id: &str) -> Option<u32> {
    let raw = custom_id.strip_prefix(PAGE_BUTTON_PREFIX)?;
    Some(
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|page| *page > 0)
            .unwrap_or(1),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageButton {
    pub direction: PageDirection,
    pub target_page: u32,
}

impl PageButton {
    pub fn custom_id(&self) -> String {
        page_button_id(self.target_page)
    }

    pub fn label(&self) -> &'static str {
        match self.direction {
            PageDirection::Previous => "◀ Previous",
            PageDirection::Next => "Next ▶",
        }
    }
}

/// The page actually shown: what the API reports, or what was asked for.
pub fn current_page(requested_page: u32, meta: &PageMeta) -> u32 {
    meta.current_page.unwrap_or(requested_page).max(1)
}

/// Buttons for a rendered page. Without a known `last_page`, Next is offered
/// optimistically and an empty follow-up page ends the navigation.
pub fn page_buttons(requested_page: u32, meta: &PageMeta) -> Vec<PageButton> {
    let current = current_page(requested_page, meta);
    let mut buttons = Vec::with_capacity(2);

    if current > 1 {
        buttons.push(PageButton {
            direction: PageDirection::Previous,
            target_page: current - 1,
        });
    }

    let has_next = match meta.last_page {
        Some(last) => current < last,
        None => true,
    };
    if has_next && let Some(next) = current.checked_add(1) {
        buttons.push(PageButton {
            direction: PageDirection::Next,
            target_page: next,
        });
    }

    buttons
}

//! Decides what an inbound interaction should do, without touching Discord or
//! the network.

use kuupress_core::GuildAllowList;
use kuupress_utils::pagination::parse_page_button;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationKind<'a> {
    Command {
        name: &'a str,
        username: Option<&'a str>,
    },
    Button {
        custom_id: &'a str,
    },
}

/// The parts of an interaction the router looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub guild_id: Option<u64>,
    pub kind: InvocationKind<'a>,
}

impl<'a> Invocation<'a> {
    pub fn command(guild_id: Option<u64>, name: &'a str, username: Option<&'a str>) -> Self {
        Self {
            guild_id,
            kind: InvocationKind::Command { name, username },
        }
    }

    pub fn button(guild_id: Option<u64>, custom_id: &'a str) -> Self {
        Self {
            guild_id,
            kind: InvocationKind::Button { custom_id },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Guild is not on the allow-list.
    Reject,
    ShowLeaderboard { page: u32 },
    ShowProfile { username: String },
    /// A page button was pressed; the existing message gets updated.
    TurnPage { page: u32 },
    MissingUsername,
    Ignore,
}

impl Action {
    /// Actions that call the remote API and therefore acknowledge first.
    pub fn needs_fetch(&self) -> bool {
        matches!(
            self,
            Self::ShowLeaderboard { .. } | Self::ShowProfile { .. } | Self::TurnPage { .. }
        )
    }
}

pub fn route(allowed_guilds: &GuildAllowList, invocation: &Invocation<'_>) -> Action {
    if !allowed_guilds.allows(invocation.guild_id) {
        return Action::Reject;
    }

    match invocation.kind {
        InvocationKind::Command { name: "rank", .. } => Action::ShowLeaderboard { page: 1 },
        InvocationKind::Command {
            name: "user",
            username,
        } => match username.map(str::trim).filter(|name| !name.is_empty()) {
            Some(username) => Action::ShowProfile {
                username: username.to_owned(),
            },
            None => Action::MissingUsername,
        },
        InvocationKind::Command { .. } => Action::Ignore,
        InvocationKind::Button { custom_id } => match parse_page_button(custom_id) {
            Some(page) => Action::TurnPage { page },
            None => Action::Ignore,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_handlers() {
        let open = GuildAllowList::default();

        assert_eq!(
            route(&open, &Invocation::command(Some(1), "rank", None)),
            Action::ShowLeaderboard { page: 1 }
        );
        assert_eq!(
            route(&open, &Invocation::command(Some(1), "user", Some("  aki "))),
            Action::ShowProfile {
                username: "aki".to_owned()
            }
        );
        assert_eq!(
            route(&open, &Invocation::command(Some(1), "ping", None)),
            Action::Ignore
        );
    }

    #[test]
    fn user_without_username_is_rejected_locally() {
        let open = GuildAllowList::default();
        assert_eq!(
            route(&open, &Invocation::command(Some(1), "user", None)),
            Action::MissingUsername
        );
        assert_eq!(
            route(&open, &Invocation::command(Some(1), "user", Some("   "))),
            Action::MissingUsername
        );
    }

    #[test]
    fn page_buttons_turn_pages() {
        let open = GuildAllowList::default();

        assert_eq!(
            route(&open, &Invocation::button(Some(1), "kuupress_lb:3")),
            Action::TurnPage { page: 3 }
        );
        assert_eq!(
            route(&open, &Invocation::button(Some(1), "kuupress_lb:nope")),
            Action::TurnPage { page: 1 }
        );
        assert_eq!(
            route(&open, &Invocation::button(Some(1), "something_else")),
            Action::Ignore
        );
    }

    #[test]
    fn allow_list_gates_everything() {
        let allowed = GuildAllowList::new([7]);

        assert_eq!(
            route(&allowed, &Invocation::command(Some(8), "rank", None)),
            Action::Reject
        );
        assert_eq!(
            route(&allowed, &Invocation::button(Some(8), "kuupress_lb:2")),
            Action::Reject
        );
        assert_eq!(
            route(&allowed, &Invocation::command(None, "user", Some("aki"))),
            Action::Reject
        );
        assert_eq!(
            route(&allowed, &Invocation::command(Some(7), "rank", None)),
            Action::ShowLeaderboard { page: 1 }
        );
    }

    #[test]
    fn direct_messages_are_rejected_even_when_every_guild_is_allowed() {
        let open = GuildAllowList::default();

        assert_eq!(
            route(&open, &Invocation::command(None, "rank", None)),
            Action::Reject
        );
        assert_eq!(
            route(&open, &Invocation::command(None, "user", Some("aki"))),
            Action::Reject
        );
        assert_eq!(
            route(&open, &Invocation::button(None, "kuupress_lb:2")),
            Action::Reject
        );
    }

    #[test]
    fn only_lookups_need_a_fetch() {
        assert!(Action::ShowLeaderboard { page: 1 }.needs_fetch());
        assert!(Action::TurnPage { page: 2 }.needs_fetch());
        assert!(
            Action::ShowProfile {
                username: "aki".to_owned()
            }
            .needs_fetch()
        );
        assert!(!Action::Reject.needs_fetch());
        assert!(!Action::MissingUsername.needs_fetch());
        assert!(!Action::Ignore.needs_fetch());
    }
}

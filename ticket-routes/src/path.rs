//! Mapping between [`NavigationState`] and URL paths.
//!
//! ```text
//! /                          landing
//! /auth/login                login
//! /auth/register             register
//! /app/dashboard             dashboard
//! /app/tickets               tickets list
//! /app/tickets/new           ticket creation form
//! /app/tickets/{id}          ticket detail
//! /app/tickets/{id}/edit     ticket edit form
//! anything else              landing
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::page::Page;
use crate::state::NavigationState;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const DASHBOARD_PATH: &str = "/app/dashboard";
pub const TICKETS_PATH: &str = "/app/tickets";
pub const NEW_TICKET_PATH: &str = "/app/tickets/new";

fn edit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/app/tickets/([^/]+)/edit$").expect("valid regex"))
}

fn detail_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/app/tickets/([^/]+)$").expect("valid regex"))
}

/// Canonical path for a state. Total: every state has exactly one path.
pub fn encode(state: &NavigationState) -> String {
    match (state.page(), state.resource_id()) {
        (Page::Landing, _) => LANDING_PATH.to_string(),
        (Page::Login, _) => LOGIN_PATH.to_string(),
        (Page::Register, _) => REGISTER_PATH.to_string(),
        (Page::Dashboard, _) => DASHBOARD_PATH.to_string(),
        (Page::Tickets, _) | (Page::TicketDetail, None) => TICKETS_PATH.to_string(),
        (Page::TicketDetail, Some(id)) => format!("{}/{}", TICKETS_PATH, encode_segment(id)),
        (Page::TicketForm, None) => NEW_TICKET_PATH.to_string(),
        (Page::TicketForm, Some(id)) => {
            format!("{}/{}/edit", TICKETS_PATH, encode_segment(id))
        }
    }
}

/// State for a path. Total: unrecognized paths decode to the landing page.
///
/// Patterns are tried from most to least specific, so the `/edit` suffix wins
/// over the bare ticket id and `/app/tickets/new` is never read as an id.
pub fn decode(path: &str) -> NavigationState {
    if path.starts_with(LOGIN_PATH) {
        return NavigationState::page_only(Page::Login);
    }
    if path.starts_with(REGISTER_PATH) {
        return NavigationState::page_only(Page::Register);
    }

    match path {
        DASHBOARD_PATH => return NavigationState::page_only(Page::Dashboard),
        TICKETS_PATH => return NavigationState::page_only(Page::Tickets),
        NEW_TICKET_PATH => return NavigationState::ticket_create(),
        _ => {}
    }

    if let Some(caps) = edit_pattern().captures(path) {
        return NavigationState::ticket_edit(decode_segment(&caps[1]));
    }
    if let Some(caps) = detail_pattern().captures(path) {
        return NavigationState::ticket_detail(decode_segment(&caps[1]));
    }

    NavigationState::landing()
}

/// Percent-encode an id for use as a single path segment.
///
/// An id that would collide with the literal `new` route gets its leading
/// character escaped as well. Dot-segment ids never reach here; see
/// [`NavigationState::new`].
fn encode_segment(id: &str) -> Cow<'_, str> {
    match id {
        "new" => Cow::Borrowed("%6Eew"),
        _ => urlencoding::encode(id),
    }
}

/// Percent-decode a path segment. Sequences that are not valid UTF-8 leave
/// the segment as it appeared in the path.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}

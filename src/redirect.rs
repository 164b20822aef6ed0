//! Authentication-gated redirect rules.
//!
//! [`decide`] is a pure function of the current page and the authentication
//! status before and after the latest change. The caller owns the previous
//! value and passes it in explicitly.

use serde::Serialize;
use ticket_routes::Page;

/// User-visible notice attached to a redirect to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Was authenticated, lost the session while on a protected page
    SessionExpired,
    /// Never authenticated, tried to open a protected page
    LoginRequired,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SessionExpired => "Your session has expired. Please log in again.",
            Self::LoginRequired => "Please log in to continue.",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A system-initiated move to another page. Always applied with replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub target: Page,
    pub notice: Option<Notice>,
}

/// Redirect required for `page`, if any.
///
/// Protected-page eviction is checked before the entry-page bounce. The two
/// cannot both match for one status value, but the order is fixed here rather
/// than left to whichever watcher happens to run first.
pub fn decide(page: Page, was_authenticated: bool, authenticated: bool) -> Option<Redirect> {
    if !authenticated && page.is_protected() {
        let notice = if was_authenticated {
            Notice::SessionExpired
        } else {
            Notice::LoginRequired
        };
        return Some(Redirect {
            target: Page::Login,
            notice: Some(notice),
        });
    }

    if authenticated && page.is_entry() {
        return Some(Redirect {
            target: Page::Dashboard,
            notice: None,
        });
    }

    None
}

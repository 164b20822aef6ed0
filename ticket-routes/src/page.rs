//! Page identifiers.

use serde::{Deserialize, Serialize};

/// Which screen of the client is active.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Landing,
    Login,
    Register,
    Dashboard,
    Tickets,
    /// Single ticket view, scoped by a ticket id
    TicketDetail,
    /// Ticket creation form, or the edit form when scoped by a ticket id
    TicketForm,
}

impl Page {
    /// Every page, in menu order.
    pub const ALL: [Page; 7] = [
        Self::Landing,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Tickets,
        Self::TicketDetail,
        Self::TicketForm,
    ];

    /// Stable identifier, same spelling as the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Tickets => "tickets",
            Self::TicketDetail => "ticket-detail",
            Self::TicketForm => "ticket-form",
        }
    }

    /// Pages that require an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Tickets | Self::TicketDetail | Self::TicketForm
        )
    }

    /// Entry pages an authenticated user has no reason to see.
    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Landing | Self::Login | Self::Register)
    }

    /// Whether a resource id is meaningful for this page.
    pub fn is_ticket_scoped(&self) -> bool {
        matches!(self, Self::TicketDetail | Self::TicketForm)
    }

    /// Target of the brand link in the header.
    pub fn home(authenticated: bool) -> Self {
        if authenticated {
            Self::Dashboard
        } else {
            Self::Landing
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loose conversion for page names coming from UI callbacks.
/// Unknown names fall back to the landing page.
impl From<&str> for Page {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "login" => Self::Login,
            "register" => Self::Register,
            "dashboard" => Self::Dashboard,
            "tickets" => Self::Tickets,
            "ticket-detail" | "ticket_detail" => Self::TicketDetail,
            "ticket-form" | "ticket_form" => Self::TicketForm,
            _ => Self::Landing,
        }
    }
}

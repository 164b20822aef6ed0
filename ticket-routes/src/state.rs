//! Navigation state and the screen it selects.

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// What is currently shown: a page plus an optional ticket id.
///
/// The id is only kept for ticket-scoped pages; constructing a state for any
/// other page drops it. Empty ids are treated as absent, and so are `.` and
/// `..`: URL parsers collapse them as dot segments in any spelling, so no path
/// can address them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StateRepr", into = "StateRepr")]
pub struct NavigationState {
    page: Page,
    resource_id: Option<String>,
}

/// Wire form, `{ "page": "...", "resourceId": "..." }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRepr {
    page: Page,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_id: Option<String>,
}

impl From<StateRepr> for NavigationState {
    fn from(repr: StateRepr) -> Self {
        Self::new(repr.page, repr.resource_id)
    }
}

impl From<NavigationState> for StateRepr {
    fn from(state: NavigationState) -> Self {
        Self {
            page: state.page,
            resource_id: state.resource_id,
        }
    }
}

impl NavigationState {
    pub fn new(page: Page, resource_id: Option<String>) -> Self {
        let resource_id = resource_id
            .filter(|id| is_addressable(id))
            .filter(|_| page.is_ticket_scoped());
        Self { page, resource_id }
    }

    /// State for a page that carries no id.
    pub fn page_only(page: Page) -> Self {
        Self::new(page, None)
    }

    pub fn landing() -> Self {
        Self::page_only(Page::Landing)
    }

    pub fn ticket_detail(id: impl Into<String>) -> Self {
        Self::new(Page::TicketDetail, Some(id.into()))
    }

    pub fn ticket_create() -> Self {
        Self::page_only(Page::TicketForm)
    }

    pub fn ticket_edit(id: impl Into<String>) -> Self {
        Self::new(Page::TicketForm, Some(id.into()))
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Screen the UI should render for this state.
    pub fn screen(&self) -> Screen {
        match (self.page, self.resource_id.as_deref()) {
            (Page::Landing, _) => Screen::Landing,
            (Page::Login, _) => Screen::Login,
            (Page::Register, _) => Screen::Register,
            (Page::Dashboard, _) => Screen::Dashboard,
            (Page::Tickets, _) | (Page::TicketDetail, None) => Screen::TicketList,
            (Page::TicketDetail, Some(id)) => Screen::TicketDetail(id.to_string()),
            (Page::TicketForm, None) => Screen::TicketCreate,
            (Page::TicketForm, Some(id)) => Screen::TicketEdit(id.to_string()),
        }
    }
}

fn is_addressable(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

impl From<Page> for NavigationState {
    fn from(page: Page) -> Self {
        Self::page_only(page)
    }
}

/// UI-facing projection of a [`NavigationState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "screen", content = "ticketId", rename_all = "kebab-case")]
pub enum Screen {
    Landing,
    Login,
    Register,
    Dashboard,
    TicketList,
    TicketDetail(String),
    TicketCreate,
    TicketEdit(String),
}

//! Navigator - single source of truth for what the client is showing
//!
//! Owns the current [`NavigationState`] and keeps the browser history in
//! step with it:
//! - Every transition carries a [`HistoryMode`]; user navigation pushes,
//!   redirects and back/forward updates replace
//! - After each transition the canonical path is written to history only if
//!   it differs from the address bar, then the intent resets to push
//! - Authentication changes and page changes both re-run the redirect rules
//!
//! All inputs arrive as [`NavEvent`]s, either through the direct methods or
//! through [`Navigator::run`] over an event stream. Redirect notices leave on
//! an unbounded channel.

use futures::channel::mpsc::UnboundedSender;
use futures::{Stream, StreamExt};
use ticket_routes::{decode, encode, NavigationState, Page};
use tracing::{debug, info, warn};

use crate::history::{History, HistoryMode};
use crate::redirect::{self, Notice};

/// Inputs that can move the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// User-initiated navigation from the UI
    Navigate {
        page: Page,
        resource_id: Option<String>,
    },
    /// Browser back/forward landed on `path`
    PopState { path: String },
    /// The authentication collaborator reported a new status
    AuthChanged { authenticated: bool },
}

impl NavEvent {
    pub fn navigate(page: Page) -> Self {
        Self::Navigate {
            page,
            resource_id: None,
        }
    }

    pub fn navigate_to(page: Page, resource_id: impl Into<String>) -> Self {
        Self::Navigate {
            page,
            resource_id: Some(resource_id.into()),
        }
    }
}

/// State [`Navigator::new`] settles on for `path`, without touching any
/// history or emitting notices.
pub fn resolve_start(path: &str, authenticated: bool) -> NavigationState {
    let state = decode(path);
    match redirect::decide(state.page(), false, authenticated) {
        Some(redirect) => NavigationState::page_only(redirect.target),
        None => state,
    }
}

pub struct Navigator<H: History> {
    state: NavigationState,
    /// Pending history intent for the next sync
    intent: HistoryMode,
    authenticated: bool,
    history: H,
    notices: UnboundedSender<Notice>,
}

impl<H: History> Navigator<H> {
    /// Decode the address bar into the initial state.
    ///
    /// A non-canonical start path is rewritten in place, and the redirect
    /// rules run once against the initial status with no prior session.
    pub fn new(history: H, authenticated: bool, notices: UnboundedSender<Notice>) -> Self {
        let path = history.current_path();
        let mut navigator = Self {
            state: decode(&path),
            intent: HistoryMode::Replace,
            authenticated,
            history,
            notices,
        };
        debug!(
            %path,
            page = %navigator.state.page(),
            authenticated,
            "Navigator started"
        );

        navigator.sync();
        navigator.enforce_access(false);
        navigator
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// User-initiated navigation; creates a history entry.
    pub fn navigate(&mut self, page: Page, resource_id: Option<String>) {
        self.transition(NavigationState::new(page, resource_id), HistoryMode::Push);
        self.enforce_access(self.authenticated);
    }

    /// Back/forward event; never creates a history entry.
    pub fn pop_state(&mut self, path: &str) {
        self.transition(decode(path), HistoryMode::Replace);
        self.enforce_access(self.authenticated);
    }

    /// New authentication status from the auth collaborator.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        let was_authenticated = std::mem::replace(&mut self.authenticated, authenticated);
        if was_authenticated != authenticated {
            info!(authenticated, "Authentication status changed");
        }
        self.enforce_access(was_authenticated);
    }

    pub fn handle(&mut self, event: NavEvent) {
        match event {
            NavEvent::Navigate { page, resource_id } => self.navigate(page, resource_id),
            NavEvent::PopState { path } => self.pop_state(&path),
            NavEvent::AuthChanged { authenticated } => self.set_authenticated(authenticated),
        }
    }

    /// Apply events in order until the stream ends.
    pub async fn run<S>(&mut self, events: S)
    where
        S: Stream<Item = NavEvent>,
    {
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            self.handle(event);
        }
        debug!("Navigator event stream closed");
    }

    fn transition(&mut self, next: NavigationState, mode: HistoryMode) {
        if next != self.state {
            debug!(from = %self.state.page(), to = %next.page(), ?mode, "Navigating");
            self.state = next;
        }
        self.intent = mode;
        self.sync();
    }

    fn enforce_access(&mut self, was_authenticated: bool) {
        let Some(redirect) =
            redirect::decide(self.state.page(), was_authenticated, self.authenticated)
        else {
            return;
        };

        info!(
            from = %self.state.page(),
            to = %redirect.target,
            notice = ?redirect.notice,
            "Redirecting"
        );
        if let Some(notice) = redirect.notice {
            self.emit(notice);
        }
        self.transition(NavigationState::page_only(redirect.target), HistoryMode::Replace);
    }

    fn sync(&mut self) {
        let target = encode(&self.state);
        let mode = std::mem::take(&mut self.intent);
        if target == self.history.current_path() {
            return;
        }

        let result = match mode {
            HistoryMode::Push => self.history.push(&target),
            HistoryMode::Replace => self.history.replace(&target),
        };
        match result {
            Ok(()) => debug!(path = %target, ?mode, "History updated"),
            // The navigator state stays authoritative; the address bar is stale.
            Err(e) => warn!("Failed to update history to {}: {}", target, e),
        }
    }

    fn emit(&self, notice: Notice) {
        if self.notices.unbounded_send(notice).is_err() {
            debug!(?notice, "Notice receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::history::MemoryHistory;
    use futures::channel::mpsc::{self, UnboundedReceiver};
    use futures::FutureExt;

    /// Helper to create a navigator over an in-memory history
    fn create_test_navigator(
        start_path: &str,
        authenticated: bool,
    ) -> (Navigator<MemoryHistory>, UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded();
        let navigator = Navigator::new(MemoryHistory::new(start_path), authenticated, tx);
        (navigator, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(Some(notice)) = rx.next().now_or_never() {
            notices.push(notice);
        }
        notices
    }

    #[test]
    fn test_start_decodes_address_bar() {
        let (navigator, mut rx) = create_test_navigator("/app/tickets/7/edit", true);
        assert_eq!(navigator.state(), &NavigationState::ticket_edit("7"));
        assert_eq!(navigator.history().entries(), ["/app/tickets/7/edit"]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_resolve_start_matches_running_navigator() {
        let cases = [
            ("/", false),
            ("/", true),
            ("/auth/login", true),
            ("/app/tickets/3", false),
            ("/app/tickets/3", true),
            ("/app/tickets/new", true),
            ("/unknown", false),
        ];
        for (path, authenticated) in cases {
            let (navigator, _rx) = create_test_navigator(path, authenticated);
            assert_eq!(
                &resolve_start(path, authenticated),
                navigator.state(),
                "{path} authenticated={authenticated}"
            );
        }
    }

    #[test]
    fn test_dot_ids_do_not_grow_history() {
        let (mut navigator, _rx) = create_test_navigator("/app/tickets", true);
        navigator.navigate(Page::TicketDetail, Some(".".to_string()));
        navigator.navigate(Page::TicketDetail, Some("..".to_string()));
        assert_eq!(navigator.history().entries(), ["/app/tickets"]);
        assert_eq!(navigator.state().screen(), ticket_routes::Screen::TicketList);
    }

    #[test]
    fn test_start_canonicalizes_unknown_path_with_replace() {
        let (navigator, _rx) = create_test_navigator("/no/such/page", false);
        assert_eq!(navigator.state(), &NavigationState::landing());
        assert_eq!(navigator.history().entries(), ["/"]);
    }

    #[test]
    fn test_authenticated_on_login_goes_to_dashboard_without_new_entry() {
        let (navigator, mut rx) = create_test_navigator("/auth/login", true);
        assert_eq!(navigator.state().page(), Page::Dashboard);
        assert_eq!(navigator.history().entries(), ["/app/dashboard"]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_login_while_on_login_page_replaces_entry() {
        let (mut navigator, _rx) = create_test_navigator("/", false);
        navigator.navigate(Page::Login, None);
        assert_eq!(navigator.history().entries(), ["/", "/auth/login"]);

        navigator.set_authenticated(true);
        assert_eq!(navigator.state().page(), Page::Dashboard);
        assert_eq!(navigator.history().entries(), ["/", "/app/dashboard"]);
    }

    #[test]
    fn test_session_lost_on_protected_page() {
        let (mut navigator, mut rx) = create_test_navigator("/app/tickets", true);
        navigator.set_authenticated(false);

        assert_eq!(navigator.state().page(), Page::Login);
        assert_eq!(navigator.history().entries(), ["/auth/login"]);
        assert_eq!(drain(&mut rx), vec![Notice::SessionExpired]);

        // Previous status has caught up; the next bounce is a plain login prompt
        navigator.navigate(Page::Dashboard, None);
        assert_eq!(navigator.state().page(), Page::Login);
        assert_eq!(drain(&mut rx), vec![Notice::LoginRequired]);
    }

    #[test]
    fn test_never_authenticated_navigating_to_dashboard() {
        let (mut navigator, mut rx) = create_test_navigator("/", false);
        navigator.navigate(Page::Dashboard, None);

        assert_eq!(navigator.state().page(), Page::Login);
        // The push happened, then the redirect overwrote it
        assert_eq!(navigator.history().entries(), ["/", "/auth/login"]);
        assert_eq!(drain(&mut rx), vec![Notice::LoginRequired]);
    }

    #[test]
    fn test_direct_url_to_protected_page_without_session() {
        let (navigator, mut rx) = create_test_navigator("/app/tickets/3", false);
        assert_eq!(navigator.state().page(), Page::Login);
        assert_eq!(navigator.history().entries(), ["/auth/login"]);
        assert_eq!(drain(&mut rx), vec![Notice::LoginRequired]);
    }

    #[test]
    fn test_authenticated_user_bounced_from_register() {
        let (mut navigator, mut rx) = create_test_navigator("/", false);
        navigator.set_authenticated(true);
        assert_eq!(navigator.state().page(), Page::Dashboard);

        navigator.navigate(Page::Register, None);
        assert_eq!(navigator.state().page(), Page::Dashboard);
        assert_eq!(
            navigator.history().entries(),
            ["/app/dashboard", "/app/dashboard"]
        );
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_navigation_pushes_entries() {
        let (mut navigator, _rx) = create_test_navigator("/app/dashboard", true);
        navigator.navigate(Page::Tickets, None);
        navigator.navigate(Page::TicketDetail, Some("2".to_string()));
        navigator.navigate(Page::TicketForm, Some("2".to_string()));

        assert_eq!(
            navigator.history().entries(),
            [
                "/app/dashboard",
                "/app/tickets",
                "/app/tickets/2",
                "/app/tickets/2/edit"
            ]
        );
        assert_eq!(navigator.state().screen(), ticket_routes::Screen::TicketEdit("2".to_string()));
    }

    #[test]
    fn test_navigating_to_current_state_adds_nothing() {
        let (mut navigator, _rx) = create_test_navigator("/app/tickets", true);
        navigator.navigate(Page::Tickets, None);
        // Detail without an id canonicalizes to the list path
        navigator.navigate(Page::TicketDetail, None);
        assert_eq!(navigator.history().len(), 1);
        assert_eq!(navigator.state().screen(), ticket_routes::Screen::TicketList);
    }

    #[test]
    fn test_back_and_forward_replace() {
        let (mut navigator, _rx) = create_test_navigator("/app/dashboard", true);
        navigator.navigate(Page::Tickets, None);
        navigator.navigate(Page::TicketDetail, Some("9".to_string()));

        let path = navigator.history_mut().back().unwrap();
        navigator.pop_state(&path);
        assert_eq!(navigator.state().page(), Page::Tickets);
        assert_eq!(navigator.history().len(), 3);

        let path = navigator.history_mut().forward().unwrap();
        navigator.pop_state(&path);
        assert_eq!(navigator.state(), &NavigationState::ticket_detail("9"));
        assert_eq!(navigator.history().len(), 3);

        // The next user navigation is a push again
        navigator.navigate(Page::Dashboard, None);
        assert_eq!(navigator.history().len(), 4);
    }

    #[test]
    fn test_back_into_entry_page_while_authenticated() {
        let (mut navigator, _rx) = create_test_navigator("/", false);
        navigator.navigate(Page::Login, None);
        navigator.set_authenticated(true);

        let path = navigator.history_mut().back().unwrap();
        assert_eq!(path, "/");
        navigator.pop_state(&path);

        assert_eq!(navigator.state().page(), Page::Dashboard);
        assert_eq!(navigator.history().entries(), ["/app/dashboard", "/app/dashboard"]);
    }

    #[test]
    fn test_run_applies_events_in_order() {
        let (tx, mut rx) = mpsc::unbounded();
        let mut navigator = Navigator::new(MemoryHistory::new("/"), false, tx);

        let events = futures::stream::iter(vec![
            NavEvent::navigate(Page::Tickets),
            NavEvent::AuthChanged {
                authenticated: true,
            },
            NavEvent::navigate_to(Page::TicketDetail, "abc def"),
            NavEvent::AuthChanged {
                authenticated: false,
            },
        ]);
        tokio_test::block_on(navigator.run(events));

        assert_eq!(navigator.state().page(), Page::Login);
        // Each redirect overwrote the entry its navigation had just pushed
        assert_eq!(
            navigator.history().entries(),
            ["/", "/app/dashboard", "/auth/login"]
        );
        assert_eq!(
            drain(&mut rx),
            vec![Notice::LoginRequired, Notice::SessionExpired]
        );
    }

    /// History that refuses every write
    struct RejectingHistory;

    impl History for RejectingHistory {
        fn current_path(&self) -> String {
            "/".to_string()
        }

        fn push(&mut self, _path: &str) -> Result<()> {
            Err(Error::HistoryRejected("blocked".to_string()))
        }

        fn replace(&mut self, _path: &str) -> Result<()> {
            Err(Error::HistoryUnavailable)
        }
    }

    #[test]
    fn test_history_failure_does_not_block_navigation() {
        let (tx, _rx) = mpsc::unbounded();
        let mut navigator = Navigator::new(RejectingHistory, true, tx);
        assert_eq!(navigator.state().page(), Page::Dashboard);

        navigator.navigate(Page::Tickets, None);
        assert_eq!(navigator.state().page(), Page::Tickets);
    }

    #[test]
    fn test_dropped_notice_receiver_is_tolerated() {
        let (mut navigator, rx) = create_test_navigator("/app/dashboard", true);
        drop(rx);
        navigator.set_authenticated(false);
        assert_eq!(navigator.state().page(), Page::Login);
    }
}

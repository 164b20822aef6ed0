//! Dioxus bridge for the navigator.
//!
//! The navigator runs inside a coroutine at the app root. UI code talks to it
//! through [`NavigationContext`]: it reads the current state and pending
//! notices as signals and sends navigation and auth events. In the WASM
//! build the coroutine also receives the browser's popstate events.

use dioxus::prelude::*;
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{FutureExt, StreamExt};
use ticket_routes::{NavigationState, Page, Screen};
#[cfg(target_arch = "wasm32")]
use tracing::warn;

use crate::config::Config;
use crate::history::{History, MemoryHistory};
use crate::navigator::{resolve_start, NavEvent, Navigator};
use crate::redirect::Notice;

/// Handle to the navigator, shared through the Dioxus context.
#[derive(Clone, Copy)]
pub struct NavigationContext {
    /// Current state, updated after every processed event
    pub state: Signal<NavigationState>,
    /// Redirect notices not yet shown to the user
    pub notices: Signal<Vec<Notice>>,
    events: Coroutine<NavEvent>,
}

impl NavigationContext {
    /// Screen to render; subscribes the caller to state changes.
    pub fn screen(&self) -> Screen {
        self.state.read().screen()
    }

    pub fn page(&self) -> Page {
        self.state.read().page()
    }

    pub fn navigate(&self, page: Page) {
        self.events.send(NavEvent::navigate(page));
    }

    pub fn navigate_to(&self, page: Page, resource_id: impl Into<String>) {
        self.events.send(NavEvent::navigate_to(page, resource_id));
    }

    /// Forward a status change from the auth collaborator.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.events.send(NavEvent::AuthChanged { authenticated });
    }

    /// Hand pending notices to the caller and clear them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.write())
    }
}

/// Start the navigator and provide its context to descendants.
///
/// Call once, in the root component. The initial authentication status comes
/// from the cached session under `config.session_key`.
pub fn use_navigation_provider(config: &Config) -> NavigationContext {
    let session_key = config.session_key.clone();
    let authenticated = use_hook(move || stored_session_present(&session_key));

    // Seed with the settled start state so deep links render correctly on the
    // first frame, before the coroutine is polled
    let mut state =
        use_signal(move || resolve_start(&platform_history().current_path(), authenticated));
    let mut notices = use_signal(Vec::<Notice>::new);

    let events = use_coroutine(move |mut rx: UnboundedReceiver<NavEvent>| async move {
        let (notice_tx, mut notice_rx) = mpsc::unbounded();
        let mut navigator = Navigator::new(platform_history(), authenticated, notice_tx);

        loop {
            state.set(navigator.state().clone());
            while let Some(Some(notice)) = notice_rx.next().now_or_never() {
                notices.write().push(notice);
            }

            let Some(event) = rx.next().await else {
                break;
            };
            navigator.handle(event);
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_hook(move || listen_pop_state(events));

    use_context_provider(move || NavigationContext {
        state,
        notices,
        events,
    })
}

/// Navigation context provided by [`use_navigation_provider`].
pub fn use_navigation() -> NavigationContext {
    use_context::<NavigationContext>()
}

/// Whether a valid session is cached in local storage.
///
/// Native builds have no persistent local storage, so they always start
/// unauthenticated; the auth collaborator reports later logins through
/// [`NavigationContext::set_authenticated`].
pub fn stored_session_present(session_key: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::session::{BrowserStore, SessionCache};

        match BrowserStore::new() {
            Ok(store) => SessionCache::new(store, session_key).is_authenticated(),
            Err(e) => {
                warn!("Session storage unavailable: {}", e);
                false
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = session_key;
        false
    }
}

fn platform_history() -> Box<dyn History> {
    #[cfg(target_arch = "wasm32")]
    {
        match crate::history::BrowserHistory::new() {
            Ok(history) => return Box::new(history),
            Err(e) => warn!("Falling back to in-memory history: {}", e),
        }
    }

    Box::new(MemoryHistory::default())
}

/// Forward browser back/forward events to the navigator.
#[cfg(target_arch = "wasm32")]
fn listen_pop_state(events: Coroutine<NavEvent>) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(window) = web_sys::window() else {
        warn!("No window; back/forward events will not be tracked");
        return;
    };

    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        events.send(NavEvent::PopState { path });
    });

    if let Err(e) =
        window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
    {
        warn!("Failed to register popstate listener: {:?}", e);
        return;
    }
    // Lives as long as the page
    handler.forget();
}

//! Ticket Desk - navigation core
//!
//! The client side of a support-ticket desk, reduced to the part with real
//! behavior: which screen is shown and how that stays in step with the URL.
//!
//! This library provides:
//! - URL surface (re-exported from `ticket-routes`)
//! - History synchronization with push/replace semantics
//! - Authentication-gated redirects with user-visible notices
//! - Cached session lookup for the initial authentication status
//! - Dioxus context and hooks exposing the navigator to the UI

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus bridge (shared between native and WASM builds)
pub mod app;

pub mod config;
pub mod error;
pub mod history;
pub mod navigator;
pub mod redirect;
pub mod session;

pub use error::{Error, Result};
pub use history::{History, HistoryMode, MemoryHistory};
pub use navigator::{resolve_start, NavEvent, Navigator};
pub use redirect::{Notice, Redirect};
pub use ticket_routes::{decode, encode, NavigationState, Page, Screen};

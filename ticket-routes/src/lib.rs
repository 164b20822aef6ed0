//! URL surface shared by the ticket-desk client.
//!
//! This crate defines the types that cross the boundary between the
//! browser address bar and the client:
//! - [`page`] - Closed set of page identifiers
//! - [`state`] - `NavigationState` and the screen it selects
//! - [`path`] - Encoding state into paths and decoding paths back
//!
//! Everything here is pure: no history access, no logging, no I/O.

pub mod page;
pub mod path;
pub mod state;

// Re-export commonly used types at crate root
pub use page::Page;
pub use path::{decode, encode};
pub use state::{NavigationState, Screen};

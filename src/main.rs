//! Ticket Desk route inspector
//!
//! Resolves paths or full URLs the way the client would and prints one JSON
//! line per argument:
//!
//! ```text
//! $ ticket-desk /app/tickets/abc%20def/edit
//! {"input":"/app/tickets/abc%20def/edit","state":{"page":"ticket-form","resourceId":"abc def"},...}
//! ```
//!
//! With no arguments, paths are read from stdin, one per line.

use anyhow::Result;
use serde::Serialize;
use std::io::BufRead;
use ticket_desk::{config, decode, encode, NavigationState, Screen};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Serialize)]
struct Resolution<'a> {
    input: &'a str,
    state: NavigationState,
    canonical: String,
    screen: Screen,
    /// Whether the input already was the canonical path
    canonical_input: bool,
}

fn main() -> Result<()> {
    let config = config::load_config()?;

    // Initialize logging (stderr, so stdout stays machine-readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(?config, "Configuration loaded");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            let input = line.trim();
            if !input.is_empty() {
                print_resolution(input)?;
            }
        }
    } else {
        for input in &args {
            print_resolution(input)?;
        }
    }

    Ok(())
}

fn print_resolution(input: &str) -> Result<()> {
    let path = path_of(input);
    let state = decode(&path);
    let canonical = encode(&state);
    tracing::debug!(%input, %path, page = %state.page(), "Resolved");

    let resolution = Resolution {
        input,
        canonical_input: canonical == path,
        screen: state.screen(),
        state,
        canonical,
    };
    println!("{}", serde_json::to_string(&resolution)?);
    Ok(())
}

/// Path component of a full URL, or the input itself when it is already a path.
fn path_of(input: &str) -> String {
    match Url::parse(input) {
        Ok(url) => url.path().to_string(),
        Err(_) => input.to_string(),
    }
}

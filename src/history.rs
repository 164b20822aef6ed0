//! Browser history abstraction.
//!
//! The navigator only needs three operations from the platform: read the
//! current path, push a new entry, or overwrite the current one.
//! [`MemoryHistory`] backs tests and the native tool; [`BrowserHistory`]
//! talks to `window.history` in the WASM build.

use crate::error::Result;

/// Whether a transition creates a new history entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryMode {
    /// User-initiated navigation (new entry)
    #[default]
    Push,
    /// Redirects and back/forward updates (overwrite current entry)
    Replace,
}

pub trait History {
    /// Path currently shown in the address bar.
    fn current_path(&self) -> String;

    fn push(&mut self, path: &str) -> Result<()>;

    fn replace(&mut self, path: &str) -> Result<()>;
}

/// In-memory history stack with a cursor, like a browser tab's session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(start_path: impl Into<String>) -> Self {
        Self {
            entries: vec![start_path.into()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the cursor back, returning the path a popstate event would carry.
    pub fn back(&mut self) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    pub fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        // Drop forward entries, as a browser does
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index += 1;
        Ok(())
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        self.entries[self.index] = path.to_string();
        Ok(())
    }
}

impl<H: History + ?Sized> History for Box<H> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        (**self).push(path)
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        (**self).replace(path)
    }
}

/// `window.history` / `window.location` backed history.
#[cfg(target_arch = "wasm32")]
pub struct BrowserHistory {
    window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(crate::error::Error::HistoryUnavailable)?;
        Ok(Self { window })
    }

    fn history(&self) -> Result<web_sys::History> {
        self.window
            .history()
            .map_err(|_| crate::error::Error::HistoryUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl History for BrowserHistory {
    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn push(&mut self, path: &str) -> Result<()> {
        self.history()?
            .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            .map_err(|e| crate::error::Error::HistoryRejected(format!("{:?}", e)))
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        self.history()?
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            .map_err(|e| crate::error::Error::HistoryRejected(format!("{:?}", e)))
    }
}

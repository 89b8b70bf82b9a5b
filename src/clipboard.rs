use std::sync::Mutex;

use crate::error::{Error, Result};

/// Host clipboard. Only plain text is ever written.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// In-process clipboard for headless hosts; keeps the last written text
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|contents| contents.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

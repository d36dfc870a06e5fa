use crate::error::{MafateehError, Result};
use arboard::Clipboard;

/// Somewhere the keyboard can paste text from.
pub trait ClipboardSource {
    /// Current text, or `None` when the clipboard holds no text.
    fn text(&mut self) -> Result<Option<String>>;
}

/// The system clipboard.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().map_err(|e| MafateehError::Clipboard(e.to_string()))?;
        Ok(Self { clipboard })
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| MafateehError::Clipboard(e.to_string()))
    }
}

impl ClipboardSource for SystemClipboard {
    fn text(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(MafateehError::Clipboard(e.to_string())),
        }
    }
}

/// Fixed clipboard contents, for simulators and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard(pub Option<String>);

impl ClipboardSource for StaticClipboard {
    fn text(&mut self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

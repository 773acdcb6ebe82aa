use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),
    #[error("clipboard write refused: {0}")]
    Refused(#[source] arboard::Error),
}

/// Write-only access to a clipboard
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, opened on first use.
///
/// The handle is kept open afterwards: on X11/Wayland the copied text only
/// stays available while its owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?);
        }

        if let Some(clipboard) = self.inner.as_mut() {
            if let Err(e) = clipboard.set_text(text) {
                // Reopen on the next attempt
                self.inner = None;
                return Err(ClipboardError::Refused(e));
            }
        }

        debug!(chars = text.chars().count(), "copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Clipboard that remembers writes, or refuses them when `refuse` is set
    #[derive(Clone, Default)]
    pub struct RecordingClipboard {
        pub writes: Arc<Mutex<Vec<String>>>,
        pub refuse: bool,
    }

    impl RecordingClipboard {
        pub fn refusing() -> Self {
            Self {
                refuse: true,
                ..Self::default()
            }
        }

        pub fn written(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl ClipboardSink for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.refuse {
                return Err(ClipboardError::Refused(arboard::Error::ClipboardOccupied));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_recording_clipboard() {
        let mut clipboard = RecordingClipboard::default();
        clipboard.write_text("Hola").unwrap();
        assert_eq!(clipboard.written(), vec!["Hola".to_string()]);

        let mut blocked = RecordingClipboard::refusing();
        assert!(matches!(
            blocked.write_text("Hola"),
            Err(ClipboardError::Refused(_))
        ));
        assert!(blocked.written().is_empty());
    }
}

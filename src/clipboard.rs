use arboard::Clipboard;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write was rejected: {0}")]
    WriteFailed(String),
}

/// Anything that can put text on a clipboard.
///
/// Writes may suspend; callers must not assume they complete in the order
/// they were started.
pub trait ClipboardWriter: Send + Sync + 'static {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// The platform clipboard, backed by arboard.
///
/// The arboard handle is kept alive for the lifetime of the process: on Linux
/// clipboard contents are served by the owning process and vanish with it.
#[derive(Clone, Default)]
pub struct SystemClipboard {
    handle: Arc<Mutex<Option<Clipboard>>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let handle = Arc::clone(&self.handle);
        let text = text.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut guard = handle
                .lock()
                .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;

            if guard.is_none() {
                let clipboard =
                    Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                *guard = Some(clipboard);
            }

            match guard.as_mut() {
                Some(clipboard) => clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
                None => Err(ClipboardError::Unavailable("no clipboard handle".to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::WriteFailed(format!("clipboard task failed: {e}")))?
    }
}

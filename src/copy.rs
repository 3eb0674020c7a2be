use crate::clipboard::ClipboardWriter;
use tokio::sync::watch;
use tracing::{debug, warn};

/// The shared "what was copied last" value observed by every display item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyState {
    pub last_copied: Option<String>,
    /// Number of successful copies so far, including repeats of the same text.
    pub copies: u64,
}

impl CopyState {
    /// A display item is in the copied state iff its text is the last copied value.
    pub fn is_copied(&self, text: &str) -> bool {
        self.last_copied.as_deref() == Some(text)
    }

    fn record(&mut self, text: &str) {
        self.copies += 1;
        if !self.is_copied(text) {
            self.last_copied = Some(text.to_string());
        }
    }
}

/// Performs clipboard writes and publishes the last successfully copied text.
///
/// Every completed write updates the same watch value, so when writes overlap
/// the state reflects whichever one resolved last.
pub struct CopyController<C> {
    clipboard: C,
    state: watch::Sender<CopyState>,
}

impl<C: ClipboardWriter> CopyController<C> {
    pub fn new(clipboard: C) -> Self {
        let (state, _) = watch::channel(CopyState::default());
        Self { clipboard, state }
    }

    /// Write `text` to the clipboard. Returns whether the write succeeded;
    /// failures are logged and leave the copy state untouched.
    pub async fn copy(&self, text: &str) -> bool {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                self.state.send_modify(|state| state.record(text));
                debug!(chars = text.chars().count(), "Copied text to clipboard");
                true
            }
            Err(err) => {
                warn!(error = %err, "Clipboard write failed");
                false
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CopyState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CopyState {
        self.state.borrow().clone()
    }

    pub fn last_copied_text(&self) -> Option<String> {
        self.state.borrow().last_copied.clone()
    }

    pub fn is_copied(&self, text: &str) -> bool {
        self.state.borrow().is_copied(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::clipboard::testing::{GatedClipboard, MemoryClipboard};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_successful_copy_records_text() {
        let clipboard = MemoryClipboard::default();
        let controller = CopyController::new(clipboard.clone());

        assert_eq!(controller.last_copied_text(), None);
        assert!(controller.copy("8005394377").await);
        assert_eq!(controller.last_copied_text(), Some("8005394377".to_string()));
        assert_eq!(clipboard.writes(), vec!["8005394377".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_string_is_copyable() {
        let controller = CopyController::new(MemoryClipboard::default());
        assert!(controller.copy("").await);
        assert!(controller.is_copied(""));
    }

    #[tokio::test]
    async fn test_new_value_supersedes_previous() {
        let controller = CopyController::new(MemoryClipboard::default());
        controller.copy("101019644").await;
        controller.copy("216258445843").await;

        assert!(controller.is_copied("216258445843"));
        assert!(!controller.is_copied("101019644"));
    }

    #[tokio::test]
    async fn test_failed_copy_keeps_previous_state() {
        let clipboard = MemoryClipboard::default();
        let controller = CopyController::new(clipboard.clone());
        controller.copy("MODRIE22XXX").await;

        clipboard.set_deny(true);
        assert!(!controller.copy("IE08MODR99035511807784").await);

        assert_eq!(controller.last_copied_text(), Some("MODRIE22XXX".to_string()));
        assert_eq!(controller.state().copies, 1);
    }

    #[tokio::test]
    async fn test_failed_copy_from_initial_state() {
        let controller = CopyController::new(MemoryClipboard::denying());
        assert!(!controller.copy("491329885").await);
        assert_eq!(controller.state(), CopyState::default());
    }

    #[tokio::test]
    async fn test_repeat_copy_keeps_text_and_counts_event() {
        let controller = CopyController::new(MemoryClipboard::default());
        let mut rx = controller.subscribe();

        controller.copy("491329885").await;
        rx.borrow_and_update();
        controller.copy("491329885").await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.last_copied.as_deref(), Some("491329885"));
        assert_eq!(state.copies, 2);
    }

    #[tokio::test]
    async fn test_last_resolved_write_wins() {
        let clipboard = GatedClipboard::default();
        let release_a = clipboard.gate("A");
        let release_b = clipboard.gate("B");
        let controller = Arc::new(CopyController::new(clipboard));

        let copy_a = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.copy("A").await }
        });
        tokio::task::yield_now().await;
        let copy_b = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.copy("B").await }
        });
        tokio::task::yield_now().await;

        release_b.send(Ok(())).unwrap();
        assert!(copy_b.await.unwrap());
        assert_eq!(controller.last_copied_text().as_deref(), Some("B"));

        release_a.send(Ok(())).unwrap();
        assert!(copy_a.await.unwrap());
        assert_eq!(controller.last_copied_text().as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_overlapping_failure_does_not_clobber_success() {
        let clipboard = GatedClipboard::default();
        let release_a = clipboard.gate("A");
        let release_b = clipboard.gate("B");
        let controller = Arc::new(CopyController::new(clipboard));

        let copy_a = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.copy("A").await }
        });
        let copy_b = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.copy("B").await }
        });

        release_b.send(Ok(())).unwrap();
        assert!(copy_b.await.unwrap());
        release_a
            .send(Err(ClipboardError::WriteFailed("denied".to_string())))
            .unwrap();
        assert!(!copy_a.await.unwrap());

        assert_eq!(controller.last_copied_text().as_deref(), Some("B"));
    }

    #[test]
    fn test_copied_state_is_pure_equality() {
        let state = CopyState {
            last_copied: Some("0x75d11ad40f5c81376d95fa3d5380f65d90f58889".to_string()),
            copies: 1,
        };
        // Two items sharing the same address are both shown as copied.
        assert!(state.is_copied("0x75d11ad40f5c81376d95fa3d5380f65d90f58889"));
        assert!(!state.is_copied("TCMb77f8EAFbJ3tCHGD6ZqhFa5bTxVbkmq"));
        assert!(!CopyState::default().is_copied(""));
    }
}

//! Page-scoped copy coordination.
//!
//! One `CopyContext` is owned by the page. It holds the only copy controller
//! and the only notification timer, and reacts to changes of the shared copy
//! state by (re)arming the timer. Leaf components never see it directly; they
//! render from a [`CopySnapshot`] taken once per frame.

use crate::clipboard::ClipboardWriter;
use crate::config::NotificationConfig;
use crate::copy::{CopyController, CopyState};
use crate::notification::{DismissReason, NotificationTimer};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

/// What a display item needs to know to draw itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySnapshot {
    pub last_copied: Option<String>,
    pub notification_visible: bool,
}

impl CopySnapshot {
    pub fn is_copied(&self, text: &str) -> bool {
        self.last_copied.as_deref() == Some(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    /// A spawned copy finished.
    CopyFinished { succeeded: bool },
    /// The shared copy state changed; `rearmed` tells whether the banner was (re)shown.
    StateChanged { rearmed: bool },
    NotificationHidden(DismissReason),
}

enum Wake {
    Finished(Result<bool, JoinError>),
    Changed,
    Hidden(DismissReason),
}

pub struct CopyContext<C> {
    controller: Arc<CopyController<C>>,
    copies: watch::Receiver<CopyState>,
    observed: CopyState,
    timer: NotificationTimer,
    in_flight: JoinSet<bool>,
    rearm_on_repeat: bool,
}

impl<C: ClipboardWriter> CopyContext<C> {
    pub fn new(clipboard: C, settings: &NotificationConfig) -> Self {
        let controller = Arc::new(CopyController::new(clipboard));
        let copies = controller.subscribe();
        let timer = NotificationTimer::new(settings.duration()).with_on_dismiss(|reason| {
            debug!(%reason, "Copy notification hidden");
        });

        Self {
            controller,
            copies,
            observed: CopyState::default(),
            timer,
            in_flight: JoinSet::new(),
            rearm_on_repeat: settings.rearm_on_repeat,
        }
    }

    /// Copy and wait for the result. On success the banner is already
    /// showing when this returns.
    pub async fn copy(&mut self, text: &str) -> bool {
        let succeeded = self.controller.copy(text).await;
        self.observe();
        succeeded
    }

    /// Start a copy without waiting for it. Its outcome is reported by
    /// [`next_event`](Self::next_event).
    pub fn spawn_copy(&mut self, text: String) {
        let controller = Arc::clone(&self.controller);
        self.in_flight
            .spawn(async move { controller.copy(&text).await });
    }

    pub fn last_copied_text(&self) -> Option<String> {
        self.controller.last_copied_text()
    }

    pub fn notification_visible(&self) -> bool {
        self.timer.is_visible()
    }

    pub fn dismiss(&mut self) -> bool {
        self.timer.dismiss()
    }

    pub fn snapshot(&self) -> CopySnapshot {
        CopySnapshot {
            last_copied: self.copies.borrow().last_copied.clone(),
            notification_visible: self.timer.is_visible(),
        }
    }

    /// Apply any copy-state change not yet acted on. Returns true if the
    /// banner was armed.
    ///
    /// Progress is tracked by the copy counter, not by the receiver's seen
    /// flag, so a change already consumed by `changed()` still applies.
    pub fn observe(&mut self) -> bool {
        let current = self.copies.borrow_and_update().clone();
        if current.copies == self.observed.copies {
            return false;
        }

        let new_text = current.last_copied.is_some() && current.last_copied != self.observed.last_copied;
        let repeated = self.rearm_on_repeat && current.copies > self.observed.copies;
        let rearm = new_text || repeated;
        if rearm {
            self.timer.arm();
        }

        self.observed = current;
        rearm
    }

    /// Wait for the next thing that changes what the page shows.
    ///
    /// Cancel safe, so it can sit in a `select!` next to input handling.
    pub async fn next_event(&mut self) -> ContextEvent {
        let wake = tokio::select! {
            Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => Wake::Finished(joined),
            Ok(()) = self.copies.changed() => Wake::Changed,
            reason = self.timer.elapsed() => Wake::Hidden(reason),
        };

        match wake {
            Wake::Finished(Ok(succeeded)) => ContextEvent::CopyFinished { succeeded },
            Wake::Finished(Err(err)) => {
                warn!(error = %err, "Copy task did not complete");
                ContextEvent::CopyFinished { succeeded: false }
            }
            Wake::Changed => {
                let rearmed = self.observe();
                ContextEvent::StateChanged { rearmed }
            }
            Wake::Hidden(reason) => ContextEvent::NotificationHidden(reason),
        }
    }

    /// Abort pending copies and drop the countdown without notifying.
    pub fn shutdown(&mut self) {
        self.in_flight.abort_all();
        self.timer.cancel();
    }
}

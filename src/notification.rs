//! Visibility of the single "copied" banner.
//!
//! The banner is either hidden or visible with a deadline. Every new copy
//! event re-arms the one countdown the timer owns; there is never a second
//! countdown in flight. Dropping the timer discards the countdown without
//! invoking the dismiss callback.

use std::fmt;
use std::future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep_until};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Hidden,
    Visible { deadline: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The countdown ran out without being re-armed.
    Elapsed,
    /// The owner asked for the banner to go away.
    Dismissed,
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DismissReason::Elapsed => write!(f, "elapsed"),
            DismissReason::Dismissed => write!(f, "dismissed"),
        }
    }
}

type DismissCallback = Box<dyn FnMut(DismissReason) + Send>;

pub struct NotificationTimer {
    duration: Duration,
    countdown: Option<Pin<Box<Sleep>>>,
    on_dismiss: Option<DismissCallback>,
}

impl NotificationTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            countdown: None,
            on_dismiss: None,
        }
    }

    pub fn with_on_dismiss(mut self, on_dismiss: impl FnMut(DismissReason) + Send + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show the banner, or keep it shown and restart the countdown.
    pub fn arm(&mut self) {
        let deadline = Instant::now() + self.duration;
        match self.countdown.as_mut() {
            Some(countdown) => countdown.as_mut().reset(deadline),
            None => self.countdown = Some(Box::pin(sleep_until(deadline))),
        }
    }

    pub fn state(&self) -> NotificationState {
        match &self.countdown {
            Some(countdown) if countdown.deadline() > Instant::now() => NotificationState::Visible {
                deadline: countdown.deadline(),
            },
            _ => NotificationState::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state(), NotificationState::Visible { .. })
    }

    /// Hide the banner now. Returns false if it was already hidden.
    pub fn dismiss(&mut self) -> bool {
        let Some(countdown) = self.countdown.take() else {
            return false;
        };
        let reason = if countdown.deadline() > Instant::now() {
            DismissReason::Dismissed
        } else {
            DismissReason::Elapsed
        };
        self.notify(reason);
        true
    }

    /// Discard the countdown without notifying. Used on teardown.
    pub fn cancel(&mut self) {
        self.countdown = None;
    }

    /// Resolves when the current countdown runs out, after hiding the banner.
    ///
    /// Pends forever while hidden. Cancel safe: dropping the future before it
    /// completes leaves the countdown untouched.
    pub async fn elapsed(&mut self) -> DismissReason {
        match self.countdown.as_mut() {
            Some(countdown) => countdown.as_mut().await,
            None => future::pending::<()>().await,
        }
        self.countdown = None;
        self.notify(DismissReason::Elapsed);
        DismissReason::Elapsed
    }

    fn notify(&mut self, reason: DismissReason) {
        if let Some(on_dismiss) = self.on_dismiss.as_mut() {
            on_dismiss(reason);
        }
    }
}

impl Default for NotificationTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl fmt::Debug for NotificationTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationTimer")
            .field("duration", &self.duration)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tokio::time::{advance, timeout};

    fn recording_timer() -> (NotificationTimer, Arc<Mutex<Vec<DismissReason>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let timer = NotificationTimer::default().with_on_dismiss(move |reason| {
            sink.lock().unwrap().push(reason);
        });
        (timer, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_hidden() {
        let mut timer = NotificationTimer::default();
        assert_eq!(timer.state(), NotificationState::Hidden);
        assert!(timeout(Duration::from_secs(10), timer.elapsed()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hides_after_duration() {
        let (mut timer, calls) = recording_timer();
        let start = Instant::now();

        timer.arm();
        assert!(timer.is_visible());

        assert_eq!(timer.elapsed().await, DismissReason::Elapsed);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        assert!(!timer.is_visible());
        assert_eq!(*calls.lock().unwrap(), vec![DismissReason::Elapsed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_extends_deadline_without_flicker() {
        let (mut timer, calls) = recording_timer();
        let start = Instant::now();

        timer.arm();
        advance(Duration::from_millis(1000)).await;
        assert!(timer.is_visible());
        timer.arm();

        // Past the original 3000 ms deadline the banner is still up.
        assert!(timeout(Duration::from_millis(2500), timer.elapsed()).await.is_err());
        assert!(timer.is_visible());
        assert!(calls.lock().unwrap().is_empty());

        timer.elapsed().await;
        assert_eq!(start.elapsed(), Duration::from_millis(4000));
        assert!(!timer.is_visible());
        assert_eq!(*calls.lock().unwrap(), vec![DismissReason::Elapsed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_immediate_and_idempotent() {
        let (mut timer, calls) = recording_timer();

        timer.arm();
        assert!(timer.dismiss());
        assert!(!timer.is_visible());
        assert!(!timer.dismiss());

        // The cancelled countdown never fires.
        assert!(timeout(Duration::from_secs(10), timer.elapsed()).await.is_err());
        assert_eq!(*calls.lock().unwrap(), vec![DismissReason::Dismissed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_while_hidden_is_noop() {
        let (mut timer, calls) = recording_timer();
        assert!(!timer.dismiss());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_can_rearm_after_hiding() {
        let mut timer = NotificationTimer::new(Duration::from_millis(500));
        timer.arm();
        timer.elapsed().await;
        assert!(!timer.is_visible());

        timer.arm();
        assert!(timer.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_never_calls_back() {
        let (mut timer, calls) = recording_timer();
        timer.arm();
        timer.cancel();
        assert!(!timer.is_visible());

        timer.arm();
        drop(timer);
        advance(Duration::from_secs(10)).await;

        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_follows_deadline() {
        let mut timer = NotificationTimer::default();
        timer.arm();
        let NotificationState::Visible { deadline } = timer.state() else {
            panic!("expected visible banner");
        };
        assert_eq!(deadline - Instant::now(), Duration::from_millis(3000));

        advance(Duration::from_millis(3000)).await;
        assert_eq!(timer.state(), NotificationState::Hidden);
    }
}

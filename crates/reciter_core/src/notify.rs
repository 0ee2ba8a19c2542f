//! Data-change notification bus and count notification guard.
//!
//! # Responsibility
//! - Define the events the core publishes to UI collaborators.
//! - Provide an in-process publish/subscribe implementation.
//! - Suppress repeated or too-frequent word count notifications.
//!
//! # Invariants
//! - Publishing is fire-and-forget: callers log and drop `NotifyError`.
//! - Subscribers must not publish from inside their own callback.
//! - A suppressed count notification leaves the guard state untouched.

use crate::model::word::{Word, WordId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default minimum spacing between two emitted count notifications.
pub const DEFAULT_NOTIFY_WINDOW: Duration = Duration::from_millis(300);

pub const EVENT_WORDS_COUNT_UPDATED: &str = "words-count-updated";
pub const EVENT_GLOBAL_DATA_UPDATED: &str = "global-data-updated";
pub const EVENT_WORD_UPDATED: &str = "word-updated";
pub const EVENT_REFRESH_REQUESTED: &str = "refresh-requested";

/// Event published to UI collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    /// Word count changed; `None` when the publisher did not recount.
    WordsCountUpdated { count: Option<usize> },
    /// Generic "data changed" signal.
    GlobalDataUpdated,
    /// One word was replaced in place.
    WordUpdated { id: WordId, word: Word },
    /// Best-effort request for the presenting view to reload.
    RefreshRequested,
}

impl DataEvent {
    /// Stable event name on the UI contract.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WordsCountUpdated { .. } => EVENT_WORDS_COUNT_UPDATED,
            Self::GlobalDataUpdated => EVENT_GLOBAL_DATA_UPDATED,
            Self::WordUpdated { .. } => EVENT_WORD_UPDATED,
            Self::RefreshRequested => EVENT_REFRESH_REQUESTED,
        }
    }
}

/// Delivery failure reported by a bus or subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification delivery failed: {}", self.0)
    }
}

impl Error for NotifyError {}

/// Publish side of the notification bus.
pub trait NotificationBus: Send + Sync {
    fn publish(&self, event: &DataEvent) -> Result<(), NotifyError>;
}

type Subscriber = Box<dyn Fn(&DataEvent) -> Result<(), NotifyError> + Send + Sync>;

/// In-process bus delivering events synchronously to every subscriber.
#[derive(Default)]
pub struct InProcessBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for all future events.
    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&DataEvent) -> Result<(), NotifyError> + Send + Sync + 'static,
    {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Box::new(subscriber));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map_or(0, |subscribers| subscribers.len())
    }
}

impl NotificationBus for InProcessBus {
    /// Delivers to every subscriber, returning the first failure seen.
    fn publish(&self, event: &DataEvent) -> Result<(), NotifyError> {
        let subscribers = self
            .subscribers
            .lock()
            .map_err(|_| NotifyError("subscriber list lock poisoned".to_string()))?;

        let mut first_error = None;
        for subscriber in subscribers.iter() {
            if let Err(err) = subscriber(event) {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Outcome of a count notification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDecision {
    Emit,
    SameCount,
    TooSoon,
}

#[derive(Debug, Default)]
struct CountState {
    last_count: Option<usize>,
    last_emitted_at: Option<Instant>,
}

/// Guard deciding whether a word count notification goes out.
#[derive(Debug)]
pub struct CountNotifier {
    window: Duration,
    state: Mutex<CountState>,
}

impl CountNotifier {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(CountState::default()),
        }
    }

    /// Checks `count` against the last emitted notification.
    ///
    /// Same count is suppressed first; otherwise anything inside the window
    /// since the last emission is suppressed. `Emit` records the new state.
    pub fn check(&self, count: usize) -> CountDecision {
        self.check_at(count, Instant::now())
    }

    fn check_at(&self, count: usize, now: Instant) -> CountDecision {
        let Ok(mut state) = self.state.lock() else {
            return CountDecision::TooSoon;
        };

        if state.last_count == Some(count) {
            return CountDecision::SameCount;
        }

        if let Some(last) = state.last_emitted_at {
            if now.saturating_duration_since(last) < self.window {
                return CountDecision::TooSoon;
            }
        }

        state.last_count = Some(count);
        state.last_emitted_at = Some(now);
        CountDecision::Emit
    }
}

impl Default for CountNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_WINDOW)
    }
}

// ── Notifier ──
//
// Queue-of-one status surface. A new notice cancels the outstanding
// dismiss timer and replaces the visible message immediately; nothing in
// the engine blocks on or inspects this state. Purely advisory.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use strum::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A short-lived status message for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone)]
pub(crate) struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    current: watch::Sender<Option<Notice>>,
    dismiss: Mutex<Option<CancellationToken>>,
    /// Monotonic notice counter. The dismiss task only clears the display
    /// if its notice is still the latest one.
    seq: AtomicU64,
    duration: Duration,
}

impl Notifier {
    pub(crate) fn new(duration: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                current,
                dismiss: Mutex::new(None),
                seq: AtomicU64::new(0),
                duration,
            }),
        }
    }

    /// Show a notice, replacing any visible one. Latest wins.
    ///
    /// Must be called from within a tokio runtime: the auto-dismiss timer
    /// is a spawned task.
    pub(crate) fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notice = Notice {
            message: message.into(),
            severity,
        };
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.current.send_replace(Some(notice));

        let token = CancellationToken::new();
        let previous = self
            .inner
            .dismiss
            .lock()
            .expect("notifier lock poisoned")
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(inner.duration) => {
                    if inner.seq.load(Ordering::SeqCst) == seq {
                        inner.current.send_replace(None);
                    }
                }
            }
        });
    }

    /// The currently visible notice, if any.
    pub(crate) fn current(&self) -> Option<Notice> {
        self.inner.current.borrow().clone()
    }

    /// Subscribe to notice changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.inner.current.subscribe()
    }
}

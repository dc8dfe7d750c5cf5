use crate::alerts::metrics::Tone;
use crate::notes::uid;
use crate::toast_log::append_toast_log;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOAST_LIMIT: usize = 4;
pub const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub message: String,
    pub tone: Tone,
}

/// Transient notifications, newest first.
///
/// A single expiry timer is shared by the whole queue: every push re-arms it
/// and when it fires only the oldest toast is dropped.
#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    limit: usize,
    timeout: Duration,
    remaining: Option<Duration>,
    enabled: bool,
    log_path: Option<PathBuf>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_LIMIT, DEFAULT_TOAST_TIMEOUT)
    }
}

impl ToastQueue {
    pub fn new(limit: usize, timeout: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            limit,
            timeout,
            remaining: None,
            enabled: true,
            log_path: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.items.clear();
            self.remaining = None;
        }
    }

    /// Append every pushed toast to `path`.
    pub fn with_log(mut self, path: Option<PathBuf>) -> Self {
        self.log_path = path;
        self
    }

    pub fn push(&mut self, title: impl Into<String>, message: impl Into<String>, tone: Tone) {
        if !self.enabled {
            return;
        }
        let toast = Toast {
            id: uid(),
            title: title.into(),
            message: message.into(),
            tone,
        };
        tracing::debug!(title = %toast.title, "toast");
        if let Some(path) = &self.log_path {
            append_toast_log(path, &format!("{}: {}", toast.title, toast.message));
        }
        self.items.push_front(toast);
        self.items.truncate(self.limit);
        self.remaining = Some(self.timeout);
    }

    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Advance the expiry timer.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(left) = self.remaining {
            if elapsed >= left {
                self.items.pop_back();
                self.remaining = None;
            } else {
                self.remaining = Some(left - elapsed);
            }
        }
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

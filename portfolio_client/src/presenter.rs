//! Transient notifications shown after a form submission.
//!
//! At most one notification is visible at a time. A new notification removes
//! the current one immediately, without a transition.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use tokio::task::AbortHandle;

/// Time a notification stays visible before it starts to fade out.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_secs(5);

/// Duration of the exit transition.
pub const DISMISS_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationCategory {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationStyle {
    pub accent: &'static str,
    pub icon: &'static str,
}

impl NotificationCategory {
    pub fn style(self) -> NotificationStyle {
        let (accent, icon) = match self {
            Self::Success => ("#22c55e", "fa-check-circle"),
            Self::Error => ("#ef4444", "fa-exclamation-circle"),
            Self::Info => ("#3b82f6", "fa-info-circle"),
        };
        NotificationStyle { accent, icon }
    }
}

impl From<&str> for NotificationCategory {
    /// Unknown categories fall back to the neutral style.
    fn from(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub category: NotificationCategory,
}

impl Notification {
    pub fn style(&self) -> NotificationStyle {
        self.category.style()
    }
}

/// Displays a message to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + 'static {
    fn present(&self, message: String, category: NotificationCategory);
}

/// Rendering side of the presenter.
pub trait NotificationSurface: Send + Sync + 'static {
    /// Inserts the notification and starts its enter transition.
    fn show(&self, notification: &Notification);

    /// Starts the exit transition.
    fn begin_dismiss(&self, id: NotificationId);

    fn remove(&self, id: NotificationId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Visible,
    Dismissing,
}

#[derive(Debug)]
struct Active {
    id: NotificationId,
    phase: Phase,
    timer: AbortHandle,
}

#[derive(Debug)]
struct Inner<Surface> {
    surface: Surface,
    current: Mutex<Option<Active>>,
    next_id: AtomicU64,
}

/// [`Notifier`] that drives a [`NotificationSurface`].
///
/// Timers are spawned on the current tokio runtime, so notifications must be
/// presented from within one.
#[derive(Debug)]
pub struct NotificationPresenter<Surface> {
    inner: Arc<Inner<Surface>>,
}

impl<Surface> Clone for NotificationPresenter<Surface> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Surface: NotificationSurface> NotificationPresenter<Surface> {
    pub fn new(surface: Surface) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                current: Mutex::new(None),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.inner.surface
    }

    /// Id of the notification that is currently on screen, if any.
    pub fn current(&self) -> Option<NotificationId> {
        self.inner.lock_current().as_ref().map(|active| active.id)
    }

    /// Handles the close button: starts the exit transition right away.
    pub fn dismiss(&self, id: NotificationId) {
        let mut current = self.inner.lock_current();
        let Some(active) = current
            .as_mut()
            .filter(|active| active.id == id && active.phase == Phase::Visible)
        else {
            return;
        };

        active.timer.abort();
        active.phase = Phase::Dismissing;
        self.inner.surface.begin_dismiss(id);

        let inner = Arc::clone(&self.inner);
        active.timer = tokio::spawn(async move {
            tokio::time::sleep(DISMISS_TRANSITION).await;
            inner.finish_dismiss(id);
        })
        .abort_handle();
    }
}

impl<Surface: NotificationSurface> Notifier for NotificationPresenter<Surface> {
    fn present(&self, message: String, category: NotificationCategory) {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            message,
            category,
        };

        let mut current = self.inner.lock_current();
        if let Some(previous) = current.take() {
            previous.timer.abort();
            self.inner.surface.remove(previous.id);
        }

        self.inner.surface.show(&notification);

        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(AUTO_DISMISS_DELAY).await;
            if inner.begin_dismiss(id) {
                tokio::time::sleep(DISMISS_TRANSITION).await;
                inner.finish_dismiss(id);
            }
        })
        .abort_handle();

        *current = Some(Active {
            id,
            phase: Phase::Visible,
            timer,
        });
    }
}

impl<Surface: NotificationSurface> Inner<Surface> {
    fn lock_current(&self) -> MutexGuard<'_, Option<Active>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_dismiss(&self, id: NotificationId) -> bool {
        let mut current = self.lock_current();
        match current.as_mut() {
            Some(active) if active.id == id && active.phase == Phase::Visible => {
                active.phase = Phase::Dismissing;
                self.surface.begin_dismiss(id);
                true
            }
            _ => false,
        }
    }

    fn finish_dismiss(&self, id: NotificationId) {
        let mut current = self.lock_current();
        if current.as_ref().is_some_and(|active| active.id == id) {
            *current = None;
            self.surface.remove(id);
        }
    }
}

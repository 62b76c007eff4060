//! In-process overlay widget.
//!
//! The overlay shows one display at a time (loading, success or error) and
//! buffers at most one pending outcome. Ending a loading cycle flushes the
//! pending outcome onto the screen; `hide_all` never does. The egui shell
//! renders from [`OverlayWidget::snapshot`].

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use defi_unite_core::{
    Callback, DisplayRequest, ErrorOptions, FeedbackWidget, LoadingOptions, PendingState,
    SuccessOptions, WrapOptions,
};

#[derive(Debug, Default)]
struct OverlayState {
    visible: Option<Visible>,
    pending: Option<PendingState>,
}

#[derive(Debug)]
struct Visible {
    request: DisplayRequest,
    /// `on_complete` for loading, `on_close` for success and error.
    callback: Option<Callback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySnapshot {
    pub visible: Option<DisplayRequest>,
    pub pending: Option<DisplayRequest>,
}

impl OverlaySnapshot {
    pub fn is_loading(&self) -> bool {
        self.visible.as_ref().is_some_and(DisplayRequest::is_loading)
    }
}

/// Owns the overlay surfaces, one per widget identifier.
#[derive(Clone, Default)]
pub struct OverlayHost {
    surfaces: Arc<Mutex<HashMap<String, Arc<Mutex<OverlayState>>>>>,
    repaint: Arc<Mutex<Option<Callback>>>,
}

impl fmt::Debug for OverlayHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let surfaces = lock(&self.surfaces).len();
        f.debug_struct("OverlayHost")
            .field("surfaces", &surfaces)
            .finish()
    }
}

impl OverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook fired after every state change, used by the shell to request a
    /// repaint from background threads.
    pub fn set_repaint_hook(&self, f: impl Fn() + Send + Sync + 'static) {
        *lock(&self.repaint) = Some(Callback::new(f));
    }

    pub fn widget(&self, widget_id: &str) -> OverlayWidget {
        let state = Arc::clone(
            lock(&self.surfaces)
                .entry(widget_id.to_owned())
                .or_default(),
        );
        OverlayWidget {
            widget_id: widget_id.to_owned(),
            state,
            repaint: Arc::clone(&self.repaint),
        }
    }
}

/// Handle to one overlay surface. Clones share the surface.
#[derive(Clone)]
pub struct OverlayWidget {
    widget_id: String,
    state: Arc<Mutex<OverlayState>>,
    repaint: Arc<Mutex<Option<Callback>>>,
}

impl fmt::Debug for OverlayWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayWidget")
            .field("widget_id", &self.widget_id)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl OverlayWidget {
    pub fn snapshot(&self) -> OverlaySnapshot {
        let state = self.state();
        OverlaySnapshot {
            visible: state.visible.as_ref().map(|v| v.request.clone()),
            pending: state.pending.as_ref().map(PendingState::to_display),
        }
    }

    /// Ends the current loading cycle. A buffered outcome is shown and
    /// cleared; otherwise the overlay hides. Returns `false` when no loading
    /// indicator was up.
    pub fn dismiss_loading(&self) -> bool {
        let on_complete = {
            let mut state = self.state();
            let Some(visible) = state.visible.take_if(|v| v.request.is_loading()) else {
                return false;
            };
            let next = self.take_pending(&mut state);
            state.visible = next;
            visible.callback
        };
        if let Some(callback) = on_complete {
            callback.call();
        }
        self.notify();
        true
    }

    /// Closes a visible success or error display and fires its `on_close`.
    pub fn close(&self) -> bool {
        let on_close = {
            let mut state = self.state();
            match state.visible.take_if(|v| !v.request.is_loading()) {
                Some(visible) => visible.callback,
                None => return false,
            }
        };
        if let Some(callback) = on_close {
            callback.call();
        }
        self.notify();
        true
    }

    /// Shows the buffered outcome over whatever is up. Returns `false` when
    /// nothing was buffered.
    fn flush_pending(&self) -> bool {
        {
            let mut state = self.state();
            let Some(visible) = self.take_pending(&mut state) else {
                return false;
            };
            state.visible = Some(visible);
        }
        self.notify();
        true
    }

    fn take_pending(&self, state: &mut OverlayState) -> Option<Visible> {
        let (request, callback) = match state.pending.take()? {
            PendingState::Success(options) => (DisplayRequest::success(&options), options.on_close),
            PendingState::Error(options) => (DisplayRequest::error(&options), options.on_close),
        };
        tracing::debug!(widget_id = %self.widget_id, title = request.title(), "flushing pending outcome");
        Some(Visible { request, callback })
    }

    fn show(&self, request: DisplayRequest, callback: Option<Callback>) {
        tracing::debug!(widget_id = %self.widget_id, title = request.title(), "overlay display");
        self.state().visible = Some(Visible { request, callback });
        self.notify();
    }

    fn state(&self) -> MutexGuard<'_, OverlayState> {
        lock(&self.state)
    }

    fn notify(&self) {
        let hook = lock(&self.repaint).clone();
        if let Some(hook) = hook {
            hook.call();
        }
    }
}

impl FeedbackWidget for OverlayWidget {
    fn show_loading(&self, options: LoadingOptions) {
        let request = DisplayRequest::loading(&options);
        self.show(request, options.on_complete);
    }

    fn show_success(&self, options: SuccessOptions) {
        let request = DisplayRequest::success(&options);
        self.show(request, options.on_close);
    }

    fn show_error(&self, options: ErrorOptions) {
        let request = DisplayRequest::error(&options);
        self.show(request, options.on_close);
    }

    fn hide_all(&self) {
        self.state().visible = None;
        self.notify();
    }

    fn set_pending_success(&self, options: SuccessOptions) {
        self.state().pending = Some(PendingState::Success(options));
    }

    fn set_pending_error(&self, options: ErrorOptions) {
        self.state().pending = Some(PendingState::Error(options));
    }

    /// The outcome goes through the pending slot, so it replaces anything
    /// buffered before the operation finished. If the loading display was
    /// hidden or replaced meanwhile, the outcome is shown directly.
    async fn wrap<T, E, Fut>(&self, operation: Fut, options: WrapOptions<T, E>) -> Option<T>
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let WrapOptions {
            loading,
            success,
            error,
        } = options;
        self.show_loading(loading.unwrap_or_default());

        let result = operation.await;
        let value = match result {
            Ok(value) => {
                self.set_pending_success(success.map(|f| f(&value)).unwrap_or_default());
                Some(value)
            }
            Err(e) => {
                tracing::warn!(widget_id = %self.widget_id, error = %e, "wrapped operation failed");
                self.set_pending_error(
                    error
                        .map(|f| f(&e))
                        .unwrap_or_else(|| ErrorOptions {
                            message: Some(e.to_string()),
                            ..ErrorOptions::default()
                        }),
                );
                None
            }
        };
        if !self.dismiss_loading() {
            self.flush_pending();
        }
        value
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

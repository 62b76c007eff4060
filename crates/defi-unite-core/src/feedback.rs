//! Convenience layer over the feedback widget.
//!
//! Every call resolves the widget through the injected registry and forwards
//! to it. When no widget is registered the call does nothing: feedback is
//! never allowed to fail the operation it reports on.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::domain::{
    ErrorOptions, Failure, LoadingOptions, SuccessOptions, DEFAULT_ERROR_MESSAGE,
    DEFAULT_ERROR_TITLE, DEFAULT_SUCCESS_MESSAGE, DEFAULT_SUCCESS_TITLE, DEFAULT_WIDGET_ID,
    TRANSACTION_ERROR_MESSAGE, TRANSACTION_ERROR_TITLE, TRANSACTION_LOADING_MESSAGE,
    TRANSACTION_LOADING_TITLE, TRANSACTION_SUCCESS_MESSAGE, TRANSACTION_SUCCESS_TITLE,
};
use crate::ports::{FeedbackWidget, WrapOptions};
use crate::registry::WidgetRegistry;

pub struct Feedback<W> {
    registry: Arc<WidgetRegistry<W>>,
    widget_id: String,
}

impl<W> Clone for Feedback<W> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            widget_id: self.widget_id.clone(),
        }
    }
}

impl<W> fmt::Debug for Feedback<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feedback")
            .field("widget_id", &self.widget_id)
            .field("installed", &self.registry.is_installed())
            .finish()
    }
}

impl<W: FeedbackWidget> Feedback<W> {
    pub fn new(registry: Arc<WidgetRegistry<W>>) -> Self {
        Self::with_widget_id(registry, DEFAULT_WIDGET_ID)
    }

    pub fn with_widget_id(registry: Arc<WidgetRegistry<W>>, widget_id: impl Into<String>) -> Self {
        Self {
            registry,
            widget_id: widget_id.into(),
        }
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn resolve(&self) -> Option<W> {
        self.registry.resolve(&self.widget_id)
    }

    pub fn show_loading(&self, options: Option<LoadingOptions>) {
        if let Some(widget) = self.resolve() {
            widget.show_loading(options.unwrap_or_default());
        }
    }

    pub fn show_success(&self, options: Option<SuccessOptions>) {
        if let Some(widget) = self.resolve() {
            widget.show_success(options.unwrap_or_default());
        }
    }

    pub fn show_error(&self, options: Option<ErrorOptions>) {
        if let Some(widget) = self.resolve() {
            widget.show_error(options.unwrap_or_default());
        }
    }

    pub fn hide_all(&self) {
        if let Some(widget) = self.resolve() {
            widget.hide_all();
        }
    }

    /// Runs `operation` through the widget's own wrap. Without a widget the
    /// operation is dropped unpolled and `None` is returned.
    pub async fn wrap<T, E, Fut>(&self, operation: Fut, options: WrapOptions<T, E>) -> Option<T>
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let widget = self.resolve()?;
        widget.wrap(operation, options).await
    }

    pub fn show_transaction_loading(&self, message: Option<&str>) {
        self.show_loading(Some(LoadingOptions::new(
            TRANSACTION_LOADING_TITLE,
            message.unwrap_or(TRANSACTION_LOADING_MESSAGE),
        )));
    }

    pub fn show_transaction_success(&self, message: Option<&str>) {
        self.show_success(Some(transaction_success(message)));
    }

    pub fn show_transaction_success_with_id(&self, transaction_id: &str, message: Option<&str>) {
        self.show_success(Some(
            transaction_success(message).with_transaction_id(transaction_id),
        ));
    }

    pub fn show_transaction_error(&self, failure: impl Into<Failure>) {
        self.show_error(Some(transaction_error(&failure.into())));
    }

    pub fn set_pending_success(&self, options: Option<SuccessOptions>) {
        if let Some(widget) = self.resolve() {
            widget.set_pending_success(options.unwrap_or_else(|| {
                SuccessOptions::new(DEFAULT_SUCCESS_TITLE, DEFAULT_SUCCESS_MESSAGE)
            }));
        }
    }

    pub fn set_pending_error(&self, options: Option<ErrorOptions>) {
        if let Some(widget) = self.resolve() {
            widget.set_pending_error(
                options
                    .unwrap_or_else(|| ErrorOptions::new(DEFAULT_ERROR_TITLE, DEFAULT_ERROR_MESSAGE)),
            );
        }
    }

    pub fn set_pending_transaction_success(&self, message: Option<&str>) {
        self.set_pending_success(Some(transaction_success(message)));
    }

    pub fn set_pending_transaction_error(&self, failure: impl Into<Failure>) {
        self.set_pending_error(Some(transaction_error(&failure.into())));
    }
}

fn transaction_success(message: Option<&str>) -> SuccessOptions {
    let message = message
        .filter(|m| !m.is_empty())
        .unwrap_or(TRANSACTION_SUCCESS_MESSAGE);
    SuccessOptions::new(TRANSACTION_SUCCESS_TITLE, message)
}

fn transaction_error(failure: &Failure) -> ErrorOptions {
    ErrorOptions::new(
        TRANSACTION_ERROR_TITLE,
        failure.message_or(TRANSACTION_ERROR_MESSAGE),
    )
}

use std::fmt;
use std::sync::Arc;

/// Identifier the overlay widget is registered under unless configured otherwise.
pub const DEFAULT_WIDGET_ID: &str = "loading-wrapper";

pub const DEFAULT_LOADING_TITLE: &str = "Loading...";
pub const DEFAULT_LOADING_MESSAGE: &str = "Please wait...";
pub const DEFAULT_SUCCESS_TITLE: &str = "Success!";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed successfully.";
pub const DEFAULT_ERROR_TITLE: &str = "Error";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred.";

pub const TRANSACTION_LOADING_TITLE: &str = "Transaction in Progress";
pub const TRANSACTION_LOADING_MESSAGE: &str = "Processing transaction...";
pub const TRANSACTION_SUCCESS_TITLE: &str = "Transaction Successful";
pub const TRANSACTION_SUCCESS_MESSAGE: &str = "Your transaction has been completed successfully.";
pub const TRANSACTION_ERROR_TITLE: &str = "Transaction Failed";
pub const TRANSACTION_ERROR_MESSAGE: &str = "Transaction failed. Please try again.";

/// Shared callback fired by the widget (loading completed, display closed).
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadingOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub on_complete: Option<Callback>,
}

impl LoadingOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            on_complete: None,
        }
    }

    pub fn on_complete(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Callback::new(f));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuccessOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub transaction_id: Option<String>,
    pub on_close: Option<Callback>,
}

impl SuccessOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            transaction_id: None,
            on_close: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn on_close(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Callback::new(f));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub on_close: Option<Callback>,
}

impl ErrorOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            on_close: None,
        }
    }

    pub fn on_close(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Callback::new(f));
        self
    }
}

/// What the widget is asked to put on screen. Built per call, never retained
/// by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRequest {
    Loading {
        title: String,
        message: String,
    },
    Success {
        title: String,
        message: String,
        transaction_id: Option<String>,
    },
    Error {
        title: String,
        message: String,
    },
}

impl DisplayRequest {
    pub fn loading(options: &LoadingOptions) -> Self {
        Self::Loading {
            title: text_or(&options.title, DEFAULT_LOADING_TITLE),
            message: text_or(&options.message, DEFAULT_LOADING_MESSAGE),
        }
    }

    pub fn success(options: &SuccessOptions) -> Self {
        Self::Success {
            title: text_or(&options.title, DEFAULT_SUCCESS_TITLE),
            message: text_or(&options.message, DEFAULT_SUCCESS_MESSAGE),
            transaction_id: options.transaction_id.clone(),
        }
    }

    pub fn error(options: &ErrorOptions) -> Self {
        Self::Error {
            title: text_or(&options.title, DEFAULT_ERROR_TITLE),
            message: text_or(&options.message, DEFAULT_ERROR_MESSAGE),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Loading { title, .. } | Self::Success { title, .. } | Self::Error { title, .. } => {
                title
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Loading { message, .. }
            | Self::Success { message, .. }
            | Self::Error { message, .. } => message,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

fn text_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

/// Outcome buffered on a widget until its loading indicator is dismissed.
/// A widget holds at most one; a newer one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingState {
    Success(SuccessOptions),
    Error(ErrorOptions),
}

impl PendingState {
    pub fn to_display(&self) -> DisplayRequest {
        match self {
            Self::Success(options) => DisplayRequest::success(options),
            Self::Error(options) => DisplayRequest::error(options),
        }
    }
}

/// Value produced by a failed call. Error-shaped values carry a message that is
/// safe to show; anything else is opaque and gets a fixed fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Error { message: String },
    Opaque(String),
}

impl Failure {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn opaque(value: impl fmt::Debug) -> Self {
        Self::Opaque(format!("{value:?}"))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Opaque(_) => None,
        }
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message().unwrap_or(fallback)
    }
}

impl<E> From<E> for Failure
where
    E: std::error::Error,
{
    fn from(error: E) -> Self {
        Self::error(error.to_string())
    }
}

/// Wallet notifications that require the connection state to be re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEvent {
    Connected,
    Disconnected,
}

impl WalletEvent {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "walletConnected" => Some(Self::Connected),
            "walletDisconnected" => Some(Self::Disconnected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "walletConnected",
            Self::Disconnected => "walletDisconnected",
        }
    }
}

use std::fmt;
use std::future::Future;

use thiserror::Error;

use crate::domain::{ErrorOptions, LoadingOptions, SuccessOptions, WalletEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Contract(String),
}

type SuccessMapper<T> = Box<dyn Fn(&T) -> SuccessOptions + Send + Sync>;
type ErrorMapper<E> = Box<dyn Fn(&E) -> ErrorOptions + Send + Sync>;

/// Display options for a wrapped operation. The mappers see the operation's
/// result so the shown text can depend on it.
pub struct WrapOptions<T, E> {
    pub loading: Option<LoadingOptions>,
    pub success: Option<SuccessMapper<T>>,
    pub error: Option<ErrorMapper<E>>,
}

impl<T, E> Default for WrapOptions<T, E> {
    fn default() -> Self {
        Self {
            loading: None,
            success: None,
            error: None,
        }
    }
}

impl<T, E> WrapOptions<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(mut self, options: LoadingOptions) -> Self {
        self.loading = Some(options);
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T) -> SuccessOptions + Send + Sync + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&E) -> ErrorOptions + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl<T, E> fmt::Debug for WrapOptions<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapOptions")
            .field("loading", &self.loading)
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

/// Capability surface of the overlay that renders loading, success and error
/// states. Handles are cheap to clone; the widget owns its own state.
#[allow(async_fn_in_trait)]
pub trait FeedbackWidget {
    fn show_loading(&self, options: LoadingOptions);
    fn show_success(&self, options: SuccessOptions);
    fn show_error(&self, options: ErrorOptions);
    fn hide_all(&self);
    fn set_pending_success(&self, options: SuccessOptions);
    fn set_pending_error(&self, options: ErrorOptions);

    /// Runs `operation` while the loading state is shown, then shows success
    /// or error. Returns the value on success and `None` on failure.
    async fn wrap<T, E, Fut>(&self, operation: Fut, options: WrapOptions<T, E>) -> Option<T>
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display;
}

pub trait WalletPort {
    fn public_key(&self) -> Result<Option<String>, PortError>;
    fn connect(&self) -> Result<(), PortError>;
    fn disconnect(&self) -> Result<(), PortError>;
    fn drain_events(&self) -> Result<Vec<WalletEvent>, PortError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationResult {
    pub result: Option<u32>,
}

/// What a signed submission reported back. `ResultUndecodable` means the
/// network accepted the transaction but its return value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Returned(u32),
    NoResult,
    ResultUndecodable(String),
}

pub trait TransactionPort {
    fn simulate(&self) -> Result<SimulationResult, PortError>;
    fn sign_and_send(&self) -> Result<SubmitOutcome, PortError>;
}

pub trait CounterContractPort {
    type Transaction: TransactionPort;

    fn set_signer(&self, public_key: &str) -> Result<(), PortError>;
    fn get_current_value(&self) -> Result<Self::Transaction, PortError>;
    fn increment(&self) -> Result<Self::Transaction, PortError>;
    fn decrement(&self) -> Result<Self::Transaction, PortError>;
    fn reset(&self) -> Result<Self::Transaction, PortError>;
}

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use defi_unite_core::{
    CounterContractPort, DisplayRequest, ErrorOptions, Feedback, FeedbackWidget, LoadingOptions,
    PendingState, PortError, SimulationResult, SubmitOutcome, SuccessOptions, TransactionPort,
    WalletEvent, WalletPort, WidgetRegistry, WrapOptions,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCall {
    Show(DisplayRequest),
    HideAll,
    Pending(PendingState),
}

/// Widget double that records every call it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingWidget {
    pub calls: Arc<Mutex<Vec<WidgetCall>>>,
}

impl RecordingWidget {
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn shown(&self) -> Vec<DisplayRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                WidgetCall::Show(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn last_shown(&self) -> Option<DisplayRequest> {
        self.shown().pop()
    }

    fn push(&self, call: WidgetCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl FeedbackWidget for RecordingWidget {
    fn show_loading(&self, options: LoadingOptions) {
        self.push(WidgetCall::Show(DisplayRequest::loading(&options)));
    }

    fn show_success(&self, options: SuccessOptions) {
        self.push(WidgetCall::Show(DisplayRequest::success(&options)));
    }

    fn show_error(&self, options: ErrorOptions) {
        self.push(WidgetCall::Show(DisplayRequest::error(&options)));
    }

    fn hide_all(&self) {
        self.push(WidgetCall::HideAll);
    }

    fn set_pending_success(&self, options: SuccessOptions) {
        self.push(WidgetCall::Pending(PendingState::Success(options)));
    }

    fn set_pending_error(&self, options: ErrorOptions) {
        self.push(WidgetCall::Pending(PendingState::Error(options)));
    }

    async fn wrap<T, E, Fut>(&self, operation: Fut, options: WrapOptions<T, E>) -> Option<T>
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.show_loading(options.loading.unwrap_or_default());
        match operation.await {
            Ok(value) => {
                let success = options.success.map(|f| f(&value)).unwrap_or_default();
                self.show_success(success);
                Some(value)
            }
            Err(e) => {
                let error = options
                    .error
                    .map(|f| f(&e))
                    .unwrap_or_else(|| ErrorOptions::new("Error", e.to_string()));
                self.show_error(error);
                None
            }
        }
    }
}

pub fn feedback_with(widget: &RecordingWidget) -> Feedback<RecordingWidget> {
    let widget = widget.clone();
    Feedback::new(Arc::new(WidgetRegistry::with_factory(move |_| widget.clone())))
}

pub fn feedback_without_widget() -> Feedback<RecordingWidget> {
    Feedback::new(Arc::new(WidgetRegistry::new()))
}

#[derive(Debug, Clone, Default)]
pub struct FakeWallet {
    pub key: Arc<Mutex<Option<String>>>,
    pub fail_reads: Arc<Mutex<bool>>,
    pub fail_connect: Arc<Mutex<bool>>,
    pub events: Arc<Mutex<Vec<WalletEvent>>>,
}

pub const TEST_KEY: &str = "GDQP2KPQGKIHYJGXNUIYOMHARUARCA7DJT5FO2FFOOKY3B2WSQHG4W37";

impl FakeWallet {
    pub fn connected() -> Self {
        let wallet = Self::default();
        *wallet.key.lock().expect("key lock") = Some(TEST_KEY.to_owned());
        wallet
    }
}

impl WalletPort for FakeWallet {
    fn public_key(&self) -> Result<Option<String>, PortError> {
        if *self.fail_reads.lock().expect("flag lock") {
            return Err(PortError::Transport("wallet unreachable".to_owned()));
        }
        Ok(self.key.lock().expect("key lock").clone())
    }

    fn connect(&self) -> Result<(), PortError> {
        if *self.fail_connect.lock().expect("flag lock") {
            return Err(PortError::Rejected("User declined access".to_owned()));
        }
        *self.key.lock().expect("key lock") = Some(TEST_KEY.to_owned());
        self.events.lock().expect("events lock").push(WalletEvent::Connected);
        Ok(())
    }

    fn disconnect(&self) -> Result<(), PortError> {
        *self.key.lock().expect("key lock") = None;
        self.events
            .lock()
            .expect("events lock")
            .push(WalletEvent::Disconnected);
        Ok(())
    }

    fn drain_events(&self) -> Result<Vec<WalletEvent>, PortError> {
        Ok(std::mem::take(&mut *self.events.lock().expect("events lock")))
    }
}

/// Scripted contract: each transaction pops its outcome from the queues.
#[derive(Debug, Clone, Default)]
pub struct ScriptedContract {
    pub signer: Arc<Mutex<Option<String>>>,
    pub simulations: Arc<Mutex<VecDeque<Result<SimulationResult, PortError>>>>,
    pub submissions: Arc<Mutex<VecDeque<Result<SubmitOutcome, PortError>>>>,
    pub reject_signer: Arc<Mutex<bool>>,
}

impl ScriptedContract {
    pub fn simulate_returns(&self, result: Result<SimulationResult, PortError>) -> &Self {
        self.simulations.lock().expect("sim lock").push_back(result);
        self
    }

    pub fn submit_returns(&self, result: Result<SubmitOutcome, PortError>) -> &Self {
        self.submissions.lock().expect("submit lock").push_back(result);
        self
    }

    fn tx(&self) -> ScriptedTx {
        ScriptedTx {
            contract: self.clone(),
        }
    }
}

pub struct ScriptedTx {
    contract: ScriptedContract,
}

impl TransactionPort for ScriptedTx {
    fn simulate(&self) -> Result<SimulationResult, PortError> {
        self.contract
            .simulations
            .lock()
            .expect("sim lock")
            .pop_front()
            .unwrap_or(Ok(SimulationResult::default()))
    }

    fn sign_and_send(&self) -> Result<SubmitOutcome, PortError> {
        self.contract
            .submissions
            .lock()
            .expect("submit lock")
            .pop_front()
            .unwrap_or(Ok(SubmitOutcome::NoResult))
    }
}

impl CounterContractPort for ScriptedContract {
    type Transaction = ScriptedTx;

    fn set_signer(&self, public_key: &str) -> Result<(), PortError> {
        if *self.reject_signer.lock().expect("flag lock") {
            return Err(PortError::Validation("malformed public key".to_owned()));
        }
        *self.signer.lock().expect("signer lock") = Some(public_key.to_owned());
        Ok(())
    }

    fn get_current_value(&self) -> Result<ScriptedTx, PortError> {
        Ok(self.tx())
    }

    fn increment(&self) -> Result<ScriptedTx, PortError> {
        Ok(self.tx())
    }

    fn decrement(&self) -> Result<ScriptedTx, PortError> {
        Ok(self.tx())
    }

    fn reset(&self) -> Result<ScriptedTx, PortError> {
        Ok(self.tx())
    }
}

pub fn value(v: u32) -> Result<SimulationResult, PortError> {
    Ok(SimulationResult { result: Some(v) })
}

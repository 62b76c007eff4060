//! In-process wallet and counter ledger used when no wallet bridge is
//! configured, and as deterministic doubles in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use defi_unite_core::{
    CounterContractPort, PortError, SimulationResult, SubmitOutcome, TransactionPort, WalletEvent,
    WalletPort,
};

pub const LOCAL_PUBLIC_KEY: &str = "GDQP2KPQGKIHYJGXNUIYOMHARUARCA7DJT5FO2FFOOKY3B2WSQHG4W37";

#[derive(Debug)]
struct WalletState {
    account: String,
    connected: bool,
    events: Vec<WalletEvent>,
    reject_next_connect: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocalWallet {
    state: Arc<Mutex<WalletState>>,
}

impl Default for LocalWallet {
    fn default() -> Self {
        Self::with_account(LOCAL_PUBLIC_KEY)
    }
}

impl LocalWallet {
    pub fn with_account(account: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(WalletState {
                account: account.into(),
                connected: false,
                events: Vec::new(),
                reject_next_connect: None,
            })),
        }
    }

    /// Makes the next `connect` fail as if the user declined in the wallet.
    pub fn reject_next_connect(&self, reason: impl Into<String>) {
        lock(&self.state).reject_next_connect = Some(reason.into());
    }

    /// Simulates a connection change made from outside the app.
    pub fn emit(&self, event: WalletEvent) {
        let mut state = lock(&self.state);
        state.connected = event == WalletEvent::Connected;
        state.events.push(event);
    }
}

impl WalletPort for LocalWallet {
    fn public_key(&self) -> Result<Option<String>, PortError> {
        let state = lock(&self.state);
        Ok(state.connected.then(|| state.account.clone()))
    }

    fn connect(&self) -> Result<(), PortError> {
        let mut state = lock(&self.state);
        if let Some(reason) = state.reject_next_connect.take() {
            return Err(PortError::Rejected(reason));
        }
        state.connected = true;
        state.events.push(WalletEvent::Connected);
        tracing::info!(account = %state.account, "local wallet connected");
        Ok(())
    }

    fn disconnect(&self) -> Result<(), PortError> {
        let mut state = lock(&self.state);
        state.connected = false;
        state.events.push(WalletEvent::Disconnected);
        tracing::info!("local wallet disconnected");
        Ok(())
    }

    fn drain_events(&self) -> Result<Vec<WalletEvent>, PortError> {
        Ok(std::mem::take(&mut lock(&self.state).events))
    }
}

/// Scripted misbehaviour for the next signed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFault {
    /// Applied on the ledger, but the result cannot be decoded.
    UndecodableResult,
    /// Accepted without a return value and not applied.
    NoResult,
    /// Rejected by the signer.
    Rejected(String),
}

#[derive(Debug, Default)]
struct LedgerState {
    count: u32,
    signer: Option<String>,
    fault: Option<SubmitFault>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    GetCurrentValue,
    Increment,
    Decrement,
    Reset,
}

impl Method {
    fn apply(self, count: u32) -> u32 {
        match self {
            Method::GetCurrentValue => count,
            Method::Increment => count.saturating_add(1),
            Method::Decrement => count.saturating_sub(1),
            Method::Reset => 0,
        }
    }
}

/// Counter ledger with the on-chain contract's semantics: the count starts at
/// zero, decrement stops at zero and every call returns the resulting count.
#[derive(Debug, Clone, Default)]
pub struct LocalCounterContract {
    ledger: Arc<Mutex<LedgerState>>,
}

impl LocalCounterContract {
    pub fn with_count(count: u32) -> Self {
        let contract = Self::default();
        lock(&contract.ledger).count = count;
        contract
    }

    pub fn count(&self) -> u32 {
        lock(&self.ledger).count
    }

    pub fn signer(&self) -> Option<String> {
        lock(&self.ledger).signer.clone()
    }

    pub fn fail_next_submit(&self, fault: SubmitFault) {
        lock(&self.ledger).fault = Some(fault);
    }

    fn transaction(&self, method: Method) -> LocalTransaction {
        LocalTransaction {
            ledger: Arc::clone(&self.ledger),
            method,
        }
    }
}

impl CounterContractPort for LocalCounterContract {
    type Transaction = LocalTransaction;

    fn set_signer(&self, public_key: &str) -> Result<(), PortError> {
        if !public_key.starts_with('G') || public_key.len() != 56 {
            return Err(PortError::Validation(format!(
                "not a Stellar account id: {public_key}"
            )));
        }
        lock(&self.ledger).signer = Some(public_key.to_owned());
        Ok(())
    }

    fn get_current_value(&self) -> Result<LocalTransaction, PortError> {
        Ok(self.transaction(Method::GetCurrentValue))
    }

    fn increment(&self) -> Result<LocalTransaction, PortError> {
        Ok(self.transaction(Method::Increment))
    }

    fn decrement(&self) -> Result<LocalTransaction, PortError> {
        Ok(self.transaction(Method::Decrement))
    }

    fn reset(&self) -> Result<LocalTransaction, PortError> {
        Ok(self.transaction(Method::Reset))
    }
}

#[derive(Debug, Clone)]
pub struct LocalTransaction {
    ledger: Arc<Mutex<LedgerState>>,
    method: Method,
}

impl TransactionPort for LocalTransaction {
    fn simulate(&self) -> Result<SimulationResult, PortError> {
        let count = lock(&self.ledger).count;
        Ok(SimulationResult {
            result: Some(self.method.apply(count)),
        })
    }

    fn sign_and_send(&self) -> Result<SubmitOutcome, PortError> {
        let mut ledger = lock(&self.ledger);
        if ledger.signer.is_none() {
            return Err(PortError::NotConfigured("transaction signer"));
        }
        let undecodable = match ledger.fault.take() {
            Some(SubmitFault::Rejected(reason)) => return Err(PortError::Rejected(reason)),
            Some(SubmitFault::NoResult) => return Ok(SubmitOutcome::NoResult),
            Some(SubmitFault::UndecodableResult) => true,
            None => false,
        };

        ledger.count = self.method.apply(ledger.count);
        tracing::debug!(method = ?self.method, count = ledger.count, "local ledger updated");
        if undecodable {
            return Ok(SubmitOutcome::ResultUndecodable(
                "Bad union switch: 4".to_owned(),
            ));
        }
        Ok(SubmitOutcome::Returned(ledger.count))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

//! Counter contract flows: read, increment, decrement and reset, each reported
//! through the feedback widget.

use crate::domain::{Failure, LoadingOptions};
use crate::feedback::Feedback;
use crate::ports::{
    CounterContractPort, FeedbackWidget, PortError, SubmitOutcome, TransactionPort, WalletPort,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterAction {
    GetValue,
    Increment,
    Decrement,
    Reset,
}

impl CounterAction {
    pub const ALL: [CounterAction; 4] = [
        CounterAction::GetValue,
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Reset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GetValue => "Get Value",
            Self::Increment => "Increment",
            Self::Decrement => "Decrement",
            Self::Reset => "Reset",
        }
    }

    pub fn is_transaction(&self) -> bool {
        !matches!(self, Self::GetValue)
    }

    fn loading_message(&self) -> &'static str {
        match self {
            Self::GetValue => "Fetching current counter value from blockchain...",
            Self::Increment => "Incrementing counter...",
            Self::Decrement => "Decrementing counter...",
            Self::Reset => "Resetting counter...",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Self::GetValue => "read",
            Self::Increment => "incremented",
            Self::Decrement => "decremented",
            Self::Reset => "reset",
        }
    }

    fn success_message(&self, value: Option<u32>) -> String {
        match (self, value) {
            (Self::GetValue, Some(v)) => format!("Value Retrieved: {v}"),
            (_, Some(v)) => format!("Counter {} to {v}", self.past_tense()),
            (_, None) => format!("Counter {} successfully!", self.past_tense()),
        }
    }
}

pub struct CounterController<W, C, F> {
    wallet: W,
    contract: C,
    feedback: Feedback<F>,
}

impl<W, C, F> CounterController<W, C, F>
where
    W: WalletPort,
    C: CounterContractPort,
    F: FeedbackWidget,
{
    pub fn new(wallet: W, contract: C, feedback: Feedback<F>) -> Self {
        Self {
            wallet,
            contract,
            feedback,
        }
    }

    /// Points the contract client at the connected wallet. Reports and returns
    /// `false` when no wallet is connected.
    pub fn setup_contract(&self) -> bool {
        let public_key = match self.wallet.public_key() {
            Ok(Some(key)) if !key.is_empty() => key,
            Ok(_) => {
                self.feedback
                    .show_transaction_error(Failure::error("Please connect your wallet first"));
                return false;
            }
            Err(e) => {
                self.feedback.show_transaction_error(e);
                return false;
            }
        };
        if let Err(e) = self.contract.set_signer(&public_key) {
            self.feedback.show_transaction_error(e);
            return false;
        }
        true
    }

    /// Runs `action` end to end. Returns the counter value learned along the
    /// way, if any.
    pub fn run(&self, action: CounterAction) -> Option<u32> {
        if !self.setup_contract() {
            return None;
        }

        if action.is_transaction() {
            self.feedback
                .show_transaction_loading(Some(action.loading_message()));
        } else {
            self.feedback.show_loading(Some(LoadingOptions::new(
                "Getting Value",
                action.loading_message(),
            )));
        }

        let outcome = if action.is_transaction() {
            self.submit(action)
        } else {
            self.fetch_value()
        };

        match outcome {
            Ok(value) => {
                self.feedback.hide_all();
                self.feedback
                    .show_transaction_success(Some(&action.success_message(value)));
                value
            }
            Err(e) => {
                tracing::error!(action = action.label(), error = %e, "counter action failed");
                self.feedback.hide_all();
                self.feedback.show_transaction_error(e);
                None
            }
        }
    }

    pub fn get_value(&self) -> Option<u32> {
        self.run(CounterAction::GetValue)
    }

    pub fn increment(&self) -> Option<u32> {
        self.run(CounterAction::Increment)
    }

    pub fn decrement(&self) -> Option<u32> {
        self.run(CounterAction::Decrement)
    }

    pub fn reset(&self) -> Option<u32> {
        self.run(CounterAction::Reset)
    }

    /// Silent first read used when the view opens. Nothing is shown on the
    /// widget; failures are only logged.
    pub fn initialize(&self) -> Option<u32> {
        let public_key = self.wallet.public_key().ok().flatten()?;
        if let Err(e) = self.contract.set_signer(&public_key) {
            tracing::info!(error = %e, "could not initialize counter value");
            return None;
        }
        match self.read_value() {
            Ok(value) => value,
            Err(e) => {
                tracing::info!(error = %e, "could not initialize counter value");
                None
            }
        }
    }

    fn read_value(&self) -> Result<Option<u32>, PortError> {
        let tx = self.contract.get_current_value()?;
        Ok(tx.simulate()?.result)
    }

    fn fetch_value(&self) -> Result<Option<u32>, PortError> {
        match self.read_value()? {
            Some(value) => Ok(Some(value)),
            None => Err(PortError::Contract(
                "Failed to retrieve value from blockchain".to_owned(),
            )),
        }
    }

    fn submit(&self, action: CounterAction) -> Result<Option<u32>, PortError> {
        let tx = match action {
            CounterAction::Increment => self.contract.increment()?,
            CounterAction::Decrement => self.contract.decrement()?,
            CounterAction::Reset => self.contract.reset()?,
            CounterAction::GetValue => self.contract.get_current_value()?,
        };

        let returned = match tx.sign_and_send()? {
            SubmitOutcome::Returned(value) => Some(value),
            SubmitOutcome::ResultUndecodable(detail) => {
                tracing::info!(
                    action = action.label(),
                    %detail,
                    "transaction applied but its result could not be decoded; re-reading counter"
                );
                None
            }
            SubmitOutcome::NoResult => {
                return Err(PortError::Contract(
                    "Transaction failed or returned no result".to_owned(),
                ));
            }
        };

        let current = match self.read_value() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch updated value");
                None
            }
        };
        Ok(current.or(returned))
    }
}

//! Backend selection. The shell works against these enums so one binary can
//! run against the in-process ledger or a wallet bridge.

use defi_unite_core::{
    CounterContractPort, PortError, SimulationResult, SubmitOutcome, TransactionPort, WalletEvent,
    WalletPort,
};

use crate::bridge::{BridgeClient, BridgeTransaction};
use crate::config::{AdapterConfig, RuntimeMode};
use crate::local::{LocalCounterContract, LocalTransaction, LocalWallet};

#[derive(Debug, Clone)]
pub enum WalletAdapter {
    Local(LocalWallet),
    Bridge(BridgeClient),
}

#[derive(Debug, Clone)]
pub enum CounterContractAdapter {
    Local(LocalCounterContract),
    Bridge(BridgeClient),
}

#[derive(Debug, Clone)]
pub enum TransactionAdapter {
    Local(LocalTransaction),
    Bridge(BridgeTransaction),
}

#[derive(Debug, Clone)]
pub struct Backends {
    pub wallet: WalletAdapter,
    pub contract: CounterContractAdapter,
}

impl Backends {
    pub fn from_config(config: &AdapterConfig) -> Result<Self, PortError> {
        match config.runtime_mode() {
            RuntimeMode::Local => {
                tracing::info!("using in-process wallet and counter ledger");
                Ok(Self::local(LocalWallet::default(), LocalCounterContract::default()))
            }
            RuntimeMode::Bridge { base_url } => {
                tracing::info!(%base_url, "using wallet bridge");
                let client = BridgeClient::new(base_url, config.bridge_timeout_ms)?;
                Ok(Self {
                    wallet: WalletAdapter::Bridge(client.clone()),
                    contract: CounterContractAdapter::Bridge(client),
                })
            }
        }
    }

    pub fn local(wallet: LocalWallet, contract: LocalCounterContract) -> Self {
        Self {
            wallet: WalletAdapter::Local(wallet),
            contract: CounterContractAdapter::Local(contract),
        }
    }
}

impl WalletPort for WalletAdapter {
    fn public_key(&self) -> Result<Option<String>, PortError> {
        match self {
            Self::Local(w) => w.public_key(),
            Self::Bridge(w) => w.public_key(),
        }
    }

    fn connect(&self) -> Result<(), PortError> {
        match self {
            Self::Local(w) => w.connect(),
            Self::Bridge(w) => w.connect(),
        }
    }

    fn disconnect(&self) -> Result<(), PortError> {
        match self {
            Self::Local(w) => w.disconnect(),
            Self::Bridge(w) => w.disconnect(),
        }
    }

    fn drain_events(&self) -> Result<Vec<WalletEvent>, PortError> {
        match self {
            Self::Local(w) => w.drain_events(),
            Self::Bridge(w) => w.drain_events(),
        }
    }
}

impl CounterContractPort for CounterContractAdapter {
    type Transaction = TransactionAdapter;

    fn set_signer(&self, public_key: &str) -> Result<(), PortError> {
        match self {
            Self::Local(c) => c.set_signer(public_key),
            Self::Bridge(c) => c.set_signer(public_key),
        }
    }

    fn get_current_value(&self) -> Result<TransactionAdapter, PortError> {
        match self {
            Self::Local(c) => c.get_current_value().map(TransactionAdapter::Local),
            Self::Bridge(c) => c.get_current_value().map(TransactionAdapter::Bridge),
        }
    }

    fn increment(&self) -> Result<TransactionAdapter, PortError> {
        match self {
            Self::Local(c) => c.increment().map(TransactionAdapter::Local),
            Self::Bridge(c) => c.increment().map(TransactionAdapter::Bridge),
        }
    }

    fn decrement(&self) -> Result<TransactionAdapter, PortError> {
        match self {
            Self::Local(c) => c.decrement().map(TransactionAdapter::Local),
            Self::Bridge(c) => c.decrement().map(TransactionAdapter::Bridge),
        }
    }

    fn reset(&self) -> Result<TransactionAdapter, PortError> {
        match self {
            Self::Local(c) => c.reset().map(TransactionAdapter::Local),
            Self::Bridge(c) => c.reset().map(TransactionAdapter::Bridge),
        }
    }
}

impl TransactionPort for TransactionAdapter {
    fn simulate(&self) -> Result<SimulationResult, PortError> {
        match self {
            Self::Local(tx) => tx.simulate(),
            Self::Bridge(tx) => tx.simulate(),
        }
    }

    fn sign_and_send(&self) -> Result<SubmitOutcome, PortError> {
        match self {
            Self::Local(tx) => tx.sign_and_send(),
            Self::Bridge(tx) => tx.sign_and_send(),
        }
    }
}

pub mod bridge;
pub mod config;
pub mod local;
pub mod overlay;
pub mod runtime;

pub use bridge::{BridgeClient, BridgeTransaction};
pub use config::{AdapterConfig, RuntimeMode};
pub use local::{
    LocalCounterContract, LocalTransaction, LocalWallet, SubmitFault, LOCAL_PUBLIC_KEY,
};
pub use overlay::{OverlayHost, OverlaySnapshot, OverlayWidget};
pub use runtime::{Backends, CounterContractAdapter, TransactionAdapter, WalletAdapter};

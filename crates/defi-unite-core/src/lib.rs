pub mod counter;
pub mod domain;
pub mod feedback;
pub mod ports;
pub mod registry;
pub mod wallet;

pub use counter::{CounterAction, CounterController};
pub use domain::{
    Callback, DisplayRequest, ErrorOptions, Failure, LoadingOptions, PendingState,
    SuccessOptions, WalletEvent, DEFAULT_WIDGET_ID,
};
pub use feedback::Feedback;
pub use ports::{
    CounterContractPort, FeedbackWidget, PortError, SimulationResult, SubmitOutcome,
    TransactionPort, WalletPort, WrapOptions,
};
pub use registry::WidgetRegistry;
pub use wallet::{
    connect_wallet, disconnect_wallet, format_public_key, read_wallet_state, refresh_on_events,
    WalletStatus,
};

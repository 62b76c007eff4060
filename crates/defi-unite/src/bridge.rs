//! Bridge between the egui shell and the workspace crates.
//! The shell reaches wallets, the counter contract and the overlay only
//! through this type.

use std::sync::Arc;

use defi_unite_adapters::{
    AdapterConfig, Backends, CounterContractAdapter, OverlayHost, OverlayWidget, WalletAdapter,
};
use defi_unite_core::{
    connect_wallet, disconnect_wallet, format_public_key, read_wallet_state, refresh_on_events,
    CounterAction, CounterController, ErrorOptions, Feedback, LoadingOptions, PortError,
    SuccessOptions, WidgetRegistry, WrapOptions,
};

type Controller = CounterController<WalletAdapter, CounterContractAdapter, OverlayWidget>;

#[derive(Clone)]
pub struct AppBridge {
    host: OverlayHost,
    overlay: OverlayWidget,
    feedback: Feedback<OverlayWidget>,
    wallet: WalletAdapter,
    controller: Arc<Controller>,
}

impl AppBridge {
    pub fn new(config: &AdapterConfig) -> Result<Self, PortError> {
        Ok(Self::from_backends(
            Backends::from_config(config)?,
            &config.widget_id,
        ))
    }

    pub fn from_backends(backends: Backends, widget_id: &str) -> Self {
        let host = OverlayHost::new();
        let overlay = host.widget(widget_id);
        let registry = Arc::new(WidgetRegistry::with_factory({
            let host = host.clone();
            move |id| host.widget(id)
        }));
        let feedback = Feedback::with_widget_id(registry, widget_id);
        let controller = CounterController::new(
            backends.wallet.clone(),
            backends.contract,
            feedback.clone(),
        );
        Self {
            host,
            overlay,
            feedback,
            wallet: backends.wallet,
            controller: Arc::new(controller),
        }
    }

    pub fn overlay(&self) -> &OverlayWidget {
        &self.overlay
    }

    pub fn set_repaint_hook(&self, f: impl Fn() + Send + Sync + 'static) {
        self.host.set_repaint_hook(f);
    }

    pub fn read_wallet(&self) -> Option<String> {
        read_wallet_state(&self.wallet)
    }

    /// Connects through the overlay. `None` when the attempt failed; the
    /// overlay already shows why.
    pub async fn connect_wallet(&self) -> Option<Option<String>> {
        let wallet = self.wallet.clone();
        let operation = async move {
            tokio::task::spawn_blocking(move || connect_wallet(&wallet))
                .await
                .unwrap_or_else(|e| Err(PortError::Transport(format!("wallet task failed: {e}"))))
        };
        let options = WrapOptions::new()
            .loading(LoadingOptions::new(
                "Connecting Wallet",
                "Approve the connection in your Stellar wallet...",
            ))
            .on_success(|key: &Option<String>| {
                let message = match key {
                    Some(key) => format!("Connected as {}", format_public_key(key)),
                    None => "The wallet did not share an account.".to_owned(),
                };
                SuccessOptions::new("Wallet Connected", message)
            })
            .on_error(|e: &PortError| ErrorOptions::new("Connection Failed", e.to_string()));
        self.feedback.wrap(operation, options).await
    }

    pub fn disconnect_wallet(&self) -> Result<Option<String>, PortError> {
        disconnect_wallet(&self.wallet)
    }

    pub fn wallet_changes(&self) -> Option<Option<String>> {
        refresh_on_events(&self.wallet)
    }

    pub fn run_counter(&self, action: CounterAction) -> Option<u32> {
        self.controller.run(action)
    }

    pub fn initialize_counter(&self) -> Option<u32> {
        self.controller.initialize()
    }
}

//! Main application state and update loop

use std::time::{Duration, Instant};

use defi_unite_adapters::AdapterConfig;
use defi_unite_core::{CounterAction, PortError};

use crate::bridge::AppBridge;
use crate::state::{CounterUiState, JobInbox, NavState, WalletUiState, WALLET_EVENT_POLL};
use crate::ui;
use crate::views::navigation::{self, NavAction};
use crate::views::overlay::{self, OverlayAction};
use crate::views::{counter, welcome};

/// Result of a background job
#[derive(Debug)]
enum JobResult {
    WalletRead(Option<String>),
    WalletConnected(Option<Option<String>>),
    WalletDisconnected(Result<Option<String>, PortError>),
    WalletEvents(Option<Option<String>>),
    CounterInitialized(Option<u32>),
    Counter {
        action: CounterAction,
        value: Option<u32>,
    },
}

/// The main application state
pub struct App {
    bridge: AppBridge,
    runtime: tokio::runtime::Handle,
    greeting: String,
    nav: NavState,
    wallet: WalletUiState,
    counter: CounterUiState,
    jobs: JobInbox<JobResult>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        bridge: AppBridge,
        config: &AdapterConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        bridge.set_repaint_hook(move || ctx.request_repaint());

        Self {
            bridge,
            runtime,
            greeting: config.greeting.clone(),
            nav: NavState::new(),
            wallet: WalletUiState::new(
                Instant::now(),
                Duration::from_millis(config.wallet_init_delay_ms),
            ),
            counter: CounterUiState::default(),
            jobs: JobInbox::default(),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.apply_job_results();
        self.schedule_wallet_jobs(ctx);

        match navigation::render(ctx, &mut self.nav, &self.wallet.status) {
            NavAction::None => {}
            NavAction::Connect => self.connect_wallet(ctx),
            NavAction::Disconnect => self.disconnect_wallet(ctx),
            NavAction::CopyPublicKey => {
                if let Some(public_key) = &self.wallet.status.public_key {
                    ui::copy_to_clipboard(public_key);
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                welcome::render(ui, &self.greeting);
                if let Some(action) = counter::render(ui, &self.counter) {
                    self.run_counter(action, ctx);
                }
                ui.add_space(20.0);
            });
        });

        let snapshot = self.bridge.overlay().snapshot();
        if overlay::render(ctx, &snapshot) == OverlayAction::Close {
            self.bridge.overlay().close();
        }
    }
}

impl App {
    fn apply_job_results(&mut self) {
        for result in self.jobs.drain() {
            match result {
                JobResult::WalletRead(public_key) => self.wallet.status.apply(public_key),
                JobResult::WalletConnected(outcome) => self.wallet.finish_connect(outcome),
                JobResult::WalletDisconnected(Ok(public_key)) => {
                    self.wallet.status.apply(public_key)
                }
                // Already logged; the previous state stands.
                JobResult::WalletDisconnected(Err(_)) => {}
                JobResult::WalletEvents(refreshed) => self.wallet.finish_event_poll(refreshed),
                JobResult::CounterInitialized(value) => self.counter.set_value(value),
                JobResult::Counter { action, value } => self.counter.finish(action, value),
            }
        }
    }

    /// Deferred first read, then a periodic look for connection changes made
    /// in the wallet itself.
    fn schedule_wallet_jobs(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.wallet.take_initial_read(now) {
            tracing::debug!("reading initial wallet state");
            self.spawn_job(ctx, |bridge| JobResult::WalletRead(bridge.read_wallet()));
            self.spawn_job(ctx, |bridge| {
                JobResult::CounterInitialized(bridge.initialize_counter())
            });
        }
        if self.wallet.take_event_poll(now) {
            self.spawn_job(ctx, |bridge| JobResult::WalletEvents(bridge.wallet_changes()));
        }

        let wake = self
            .wallet
            .until_initial_read(now)
            .unwrap_or(WALLET_EVENT_POLL);
        ctx.request_repaint_after(wake);
    }

    fn connect_wallet(&mut self, ctx: &egui::Context) {
        if !self.wallet.begin_connect() {
            return;
        }
        let bridge = self.bridge.clone();
        let runtime = self.runtime.clone();
        let jobs = self.jobs.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = runtime.block_on(bridge.connect_wallet());
            jobs.push(JobResult::WalletConnected(outcome));
            ctx.request_repaint();
        });
    }

    fn disconnect_wallet(&mut self, ctx: &egui::Context) {
        self.spawn_job(ctx, |bridge| {
            JobResult::WalletDisconnected(bridge.disconnect_wallet())
        });
    }

    fn run_counter(&mut self, action: CounterAction, ctx: &egui::Context) {
        if !self.counter.start(action) {
            return;
        }
        tracing::info!(action = action.label(), "running counter action");
        self.spawn_job(ctx, move |bridge| JobResult::Counter {
            action,
            value: bridge.run_counter(action),
        });
    }

    /// Runs `job` on the blocking pool and hands its result to the next frame.
    fn spawn_job(
        &self,
        ctx: &egui::Context,
        job: impl FnOnce(&AppBridge) -> JobResult + Send + 'static,
    ) {
        let bridge = self.bridge.clone();
        let jobs = self.jobs.clone();
        let ctx = ctx.clone();

        self.runtime.spawn_blocking(move || {
            jobs.push(job(&bridge));
            ctx.request_repaint();
        });
    }
}

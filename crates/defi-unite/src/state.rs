//! Application state types
//!
//! Plain structs mutated by the update loop; nothing here touches egui or the
//! background runtime.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use defi_unite_core::{CounterAction, WalletStatus};

/// Window width below which the navigation bar collapses into a menu.
pub const COMPACT_NAV_WIDTH: f32 = 768.0;

/// How often the wallet is asked for connection changes made elsewhere.
pub const WALLET_EVENT_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[NavLink {
    href: "/",
    label: "Home",
}];

/// Navigation bar state
#[derive(Debug, Default)]
pub struct NavState {
    pub mobile_menu_open: bool,
    pub active_href: &'static str,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            mobile_menu_open: false,
            active_href: NAV_LINKS[0].href,
        }
    }

    pub fn toggle_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn select(&mut self, link: &NavLink) {
        self.active_href = link.href;
        self.mobile_menu_open = false;
    }

    pub fn is_compact(width: f32) -> bool {
        width < COMPACT_NAV_WIDTH
    }
}

/// Wallet side of the navigation bar: the session status plus bookkeeping for
/// the deferred first read and the event poll.
#[derive(Debug)]
pub struct WalletUiState {
    pub status: WalletStatus,
    init_at: Instant,
    initialized: bool,
    last_poll: Option<Instant>,
    poll_in_flight: bool,
}

impl WalletUiState {
    pub fn new(started: Instant, init_delay: Duration) -> Self {
        Self {
            status: WalletStatus::default(),
            init_at: started + init_delay,
            initialized: false,
            last_poll: None,
            poll_in_flight: false,
        }
    }

    /// True exactly once, when the first wallet read is due.
    pub fn take_initial_read(&mut self, now: Instant) -> bool {
        if self.initialized || now < self.init_at {
            return false;
        }
        self.initialized = true;
        true
    }

    /// Time left before the first read, if it is still pending.
    pub fn until_initial_read(&self, now: Instant) -> Option<Duration> {
        (!self.initialized).then(|| self.init_at.saturating_duration_since(now))
    }

    pub fn take_event_poll(&mut self, now: Instant) -> bool {
        if !self.initialized || self.poll_in_flight {
            return false;
        }
        if self
            .last_poll
            .is_some_and(|last| now.duration_since(last) < WALLET_EVENT_POLL)
        {
            return false;
        }
        self.last_poll = Some(now);
        self.poll_in_flight = true;
        true
    }

    pub fn finish_event_poll(&mut self, refreshed: Option<Option<String>>) {
        self.poll_in_flight = false;
        if let Some(public_key) = refreshed {
            self.status.apply(public_key);
        }
    }

    /// Marks a connect attempt as started. Returns `false` while one is
    /// already running.
    pub fn begin_connect(&mut self) -> bool {
        if self.status.is_connecting {
            return false;
        }
        self.status.is_connecting = true;
        true
    }

    /// `None` means the attempt failed and the previous state stands.
    pub fn finish_connect(&mut self, outcome: Option<Option<String>>) {
        self.status.is_connecting = false;
        if let Some(public_key) = outcome {
            self.status.apply(public_key);
        }
    }
}

/// Counter card state
#[derive(Debug)]
pub struct CounterUiState {
    pub current_value: String,
    busy: [bool; 4],
}

impl Default for CounterUiState {
    fn default() -> Self {
        Self {
            current_value: "???".to_owned(),
            busy: [false; 4],
        }
    }
}

impl CounterUiState {
    pub fn is_busy(&self, action: CounterAction) -> bool {
        self.busy[slot(action)]
    }

    /// Returns `false` when the action is already running.
    pub fn start(&mut self, action: CounterAction) -> bool {
        let busy = &mut self.busy[slot(action)];
        if *busy {
            return false;
        }
        *busy = true;
        true
    }

    pub fn finish(&mut self, action: CounterAction, value: Option<u32>) {
        self.busy[slot(action)] = false;
        self.set_value(value);
    }

    pub fn set_value(&mut self, value: Option<u32>) {
        if let Some(value) = value {
            self.current_value = value.to_string();
        }
    }

    pub fn button_label(&self, action: CounterAction) -> &'static str {
        if self.is_busy(action) {
            "Loading..."
        } else {
            action.label()
        }
    }
}

fn slot(action: CounterAction) -> usize {
    match action {
        CounterAction::GetValue => 0,
        CounterAction::Increment => 1,
        CounterAction::Decrement => 2,
        CounterAction::Reset => 3,
    }
}

/// Results handed back from background jobs, drained once per frame.
#[derive(Debug)]
pub struct JobInbox<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for JobInbox<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for JobInbox<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> JobInbox<T> {
    pub fn push(&self, item: T) {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(item);
    }

    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.items.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

use defi_unite_core::DEFAULT_WIDGET_ID;

pub const ENV_WIDGET_ID: &str = "DEFI_UNITE_WIDGET_ID";
pub const ENV_BRIDGE_URL: &str = "DEFI_UNITE_BRIDGE_URL";
pub const ENV_BRIDGE_TIMEOUT_MS: &str = "DEFI_UNITE_BRIDGE_TIMEOUT_MS";
pub const ENV_WALLET_INIT_DELAY_MS: &str = "DEFI_UNITE_WALLET_INIT_DELAY_MS";
pub const ENV_GREETING: &str = "DEFI_UNITE_GREETING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub widget_id: String,
    pub bridge_url: Option<String>,
    pub bridge_timeout_ms: u64,
    pub wallet_init_delay_ms: u64,
    pub greeting: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeMode {
    /// In-process wallet and counter ledger.
    Local,
    /// Wallet and contract calls go through an HTTP wallet bridge.
    Bridge { base_url: String },
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            widget_id: DEFAULT_WIDGET_ID.to_owned(),
            bridge_url: None,
            bridge_timeout_ms: 30_000,
            wallet_init_delay_ms: 1_000,
            greeting: "Hello, Stellar!".to_owned(),
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset or blank
    /// values keep their defaults; unparsable numbers are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(widget_id) = get(ENV_WIDGET_ID) {
            config.widget_id = widget_id;
        }
        config.bridge_url = get(ENV_BRIDGE_URL).map(|url| url.trim_end_matches('/').to_owned());
        if let Some(ms) = parse_ms(ENV_BRIDGE_TIMEOUT_MS, get(ENV_BRIDGE_TIMEOUT_MS)) {
            config.bridge_timeout_ms = ms;
        }
        if let Some(ms) = parse_ms(ENV_WALLET_INIT_DELAY_MS, get(ENV_WALLET_INIT_DELAY_MS)) {
            config.wallet_init_delay_ms = ms;
        }
        if let Some(greeting) = get(ENV_GREETING) {
            config.greeting = greeting;
        }
        config
    }

    pub fn runtime_mode(&self) -> RuntimeMode {
        match &self.bridge_url {
            Some(base_url) => RuntimeMode::Bridge {
                base_url: base_url.clone(),
            },
            None => RuntimeMode::Local,
        }
    }
}

fn parse_ms(key: &str, value: Option<String>) -> Option<u64> {
    let value = value?;
    match value.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            tracing::warn!(key, %value, error = %e, "ignoring invalid duration setting");
            None
        }
    }
}

use crate::ports::{PortError, WalletPort};

/// Connection state shown by the navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletStatus {
    pub public_key: Option<String>,
    pub is_connecting: bool,
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        self.public_key.is_some()
    }

    pub fn apply(&mut self, public_key: Option<String>) {
        self.public_key = public_key.filter(|k| !k.is_empty());
    }

    pub fn button_label(&self) -> String {
        if self.is_connecting {
            return "Connecting...".to_owned();
        }
        match &self.public_key {
            Some(key) => format_public_key(key),
            None => "Connect".to_owned(),
        }
    }

    pub fn button_hint(&self) -> &'static str {
        if self.is_connected() {
            "Disconnect Stellar Wallet"
        } else {
            "Connect Stellar Wallet"
        }
    }
}

/// Shortens a public key to `ABCD...WXYZ`. Keys of eight characters or fewer
/// are returned unchanged.
pub fn format_public_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return key.to_owned();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Reads the connected key. Any wallet error counts as disconnected.
pub fn read_wallet_state<W: WalletPort + ?Sized>(wallet: &W) -> Option<String> {
    match wallet.public_key() {
        Ok(key) => key.filter(|k| !k.is_empty()),
        Err(e) => {
            tracing::error!(error = %e, "error checking wallet state");
            None
        }
    }
}

pub fn connect_wallet<W: WalletPort + ?Sized>(wallet: &W) -> Result<Option<String>, PortError> {
    wallet.connect().inspect_err(|e| {
        tracing::error!(error = %e, "error connecting wallet");
    })?;
    Ok(read_wallet_state(wallet))
}

pub fn disconnect_wallet<W: WalletPort + ?Sized>(wallet: &W) -> Result<Option<String>, PortError> {
    wallet.disconnect().inspect_err(|e| {
        tracing::error!(error = %e, "error disconnecting wallet");
    })?;
    Ok(read_wallet_state(wallet))
}

/// Drains pending wallet events. Returns the re-read key when at least one
/// event arrived, `None` when nothing changed.
pub fn refresh_on_events<W: WalletPort + ?Sized>(wallet: &W) -> Option<Option<String>> {
    let events = match wallet.drain_events() {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, "failed to drain wallet events");
            return None;
        }
    };
    if events.is_empty() {
        return None;
    }
    tracing::debug!(count = events.len(), "wallet events received");
    Some(read_wallet_state(wallet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_not_shortened() {
        assert_eq!(format_public_key("GABC"), "GABC");
        assert_eq!(format_public_key("GABCDEFG"), "GABCDEFG");
    }

    #[test]
    fn long_keys_keep_four_characters_each_side() {
        assert_eq!(
            format_public_key("GDQP2KPQGKIHYJGXNUIYOMHARUARCA7DJT5FO2FFOOKY3B2WSQHG4W37"),
            "GDQP...4W37"
        );
        assert_eq!(format_public_key("GABCDEFGH"), "GABC...EFGH");
    }

    #[test]
    fn button_label_tracks_connection() {
        let mut status = WalletStatus::default();
        assert_eq!(status.button_label(), "Connect");

        status.is_connecting = true;
        assert_eq!(status.button_label(), "Connecting...");

        status.is_connecting = false;
        status.apply(Some("GABCDEFGHIJKL".to_owned()));
        assert!(status.is_connected());
        assert_eq!(status.button_label(), "GABC...IJKL");
        assert_eq!(status.button_hint(), "Disconnect Stellar Wallet");

        status.apply(Some(String::new()));
        assert!(!status.is_connected());
    }
}

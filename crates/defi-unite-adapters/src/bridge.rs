//! Client for the local wallet bridge: a small HTTP helper that fronts the
//! browser wallet and the Soroban contract bindings.
//!
//! All calls are blocking; run them off the UI thread.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use defi_unite_core::{
    CounterContractPort, PortError, SimulationResult, SubmitOutcome, TransactionPort, WalletEvent,
    WalletPort,
};

/// Fragment the Soroban SDK emits when a submitted transaction's return value
/// cannot be decoded, even though the transaction itself was applied.
pub const UNDECODABLE_RESULT_MARKER: &str = "Bad union switch";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyResponse {
    public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResultResponse {
    result: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignerRequest<'a> {
    public_key: &'a str,
}

#[derive(Debug, Clone)]
pub struct BridgeClient {
    base_url: String,
    client: Client,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build bridge client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|e| PortError::Transport(format!("GET {path}: {e}")))?;
        decode(path, checked(path, response)?)
    }

    fn post<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<Response, PortError> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .map_err(|e| PortError::Transport(format!("POST {path}: {e}")))?;
        checked(path, response)
    }

    fn post_empty(&self, path: &str) -> Result<Response, PortError> {
        self.post::<()>(path, None)
    }
}

/// Maps non-success statuses to errors, keeping the bridge's error text.
fn checked(path: &str, response: Response) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    tracing::debug!(path, %status, %message, "wallet bridge returned an error");
    if status.is_client_error() {
        Err(PortError::Rejected(message))
    } else {
        Err(PortError::Contract(message))
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, PortError> {
    response
        .json::<T>()
        .map_err(|e| PortError::Validation(format!("{path}: unexpected response: {e}")))
}

impl WalletPort for BridgeClient {
    fn public_key(&self) -> Result<Option<String>, PortError> {
        let response: PublicKeyResponse = self.get("wallet/public-key")?;
        Ok(response.public_key.filter(|k| !k.is_empty()))
    }

    fn connect(&self) -> Result<(), PortError> {
        self.post_empty("wallet/connect").map(drop)
    }

    fn disconnect(&self) -> Result<(), PortError> {
        self.post_empty("wallet/disconnect").map(drop)
    }

    fn drain_events(&self) -> Result<Vec<WalletEvent>, PortError> {
        let response: EventsResponse = self.get("wallet/events")?;
        Ok(response
            .events
            .iter()
            .filter_map(|name| {
                let event = WalletEvent::from_name(name);
                if event.is_none() {
                    tracing::debug!(%name, "ignoring unknown wallet event");
                }
                event
            })
            .collect())
    }
}

impl CounterContractPort for BridgeClient {
    type Transaction = BridgeTransaction;

    fn set_signer(&self, public_key: &str) -> Result<(), PortError> {
        self.post("contract/signer", Some(&SignerRequest { public_key }))
            .map(drop)
    }

    fn get_current_value(&self) -> Result<BridgeTransaction, PortError> {
        Ok(self.transaction("get_current_value"))
    }

    fn increment(&self) -> Result<BridgeTransaction, PortError> {
        Ok(self.transaction("increment"))
    }

    fn decrement(&self) -> Result<BridgeTransaction, PortError> {
        Ok(self.transaction("decrement"))
    }

    fn reset(&self) -> Result<BridgeTransaction, PortError> {
        Ok(self.transaction("reset"))
    }
}

impl BridgeClient {
    fn transaction(&self, method: &'static str) -> BridgeTransaction {
        BridgeTransaction {
            client: self.clone(),
            method,
        }
    }
}

/// An assembled contract call on the bridge side.
#[derive(Debug, Clone)]
pub struct BridgeTransaction {
    client: BridgeClient,
    method: &'static str,
}

impl BridgeTransaction {
    pub fn method(&self) -> &'static str {
        self.method
    }
}

impl TransactionPort for BridgeTransaction {
    fn simulate(&self) -> Result<SimulationResult, PortError> {
        let path = format!("contract/{}/simulate", self.method);
        let response: ResultResponse = decode(&path, self.client.post_empty(&path)?)?;
        Ok(SimulationResult {
            result: response.result,
        })
    }

    fn sign_and_send(&self) -> Result<SubmitOutcome, PortError> {
        let path = format!("contract/{}/sign-and-send", self.method);
        let response = match self.client.post_empty(&path) {
            Ok(response) => response,
            Err(PortError::Contract(message) | PortError::Rejected(message))
                if message.contains(UNDECODABLE_RESULT_MARKER) =>
            {
                tracing::info!(method = self.method, %message, "submission applied with undecodable result");
                return Ok(SubmitOutcome::ResultUndecodable(message));
            }
            Err(e) => return Err(e),
        };
        let response: ResultResponse = decode(&path, response)?;
        Ok(match response.result {
            Some(value) => SubmitOutcome::Returned(value),
            None => SubmitOutcome::NoResult,
        })
    }
}

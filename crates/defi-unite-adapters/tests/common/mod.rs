#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;
use tiny_http::{Method, Response, Server, StatusCode};

use defi_unite_adapters::{
    Backends, CounterContractAdapter, LocalCounterContract, LocalWallet, OverlayHost,
    OverlayWidget, WalletAdapter,
};
use defi_unite_core::{CounterController, Feedback, WidgetRegistry, DEFAULT_WIDGET_ID};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

/// One canned reply of the fake bridge.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    path: String,
    status: u16,
    payload: Value,
}

impl Route {
    pub fn get(path: &str, payload: Value) -> Self {
        Self::new(Method::Get, path, 200, payload)
    }

    pub fn post(path: &str, payload: Value) -> Self {
        Self::new(Method::Post, path, 200, payload)
    }

    pub fn new(method: Method, path: &str, status: u16, payload: Value) -> Self {
        Self {
            method,
            path: path.to_owned(),
            status,
            payload,
        }
    }
}

/// Fake wallet bridge on an ephemeral port. Unknown routes answer 404.
pub struct FakeBridge {
    pub url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBridge {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

pub fn spawn_bridge(routes: Vec<Route>) -> FakeBridge {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let url = format!("http://{}", server.server_addr());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    thread::spawn(move || {
        while let Ok(mut req) = server.recv() {
            let method = req.method().clone();
            let path = req.url().to_owned();
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            if let Ok(mut g) = recorded.lock() {
                g.push(RecordedRequest {
                    method: method.to_string(),
                    path: path.clone(),
                    body,
                });
            }

            let (code, payload) = routes
                .iter()
                .find(|r| r.method == method && r.path == path)
                .map(|r| (r.status, r.payload.clone()))
                .unwrap_or((404, serde_json::json!({"error": "not found"})));

            let response = Response::from_string(payload.to_string())
                .with_status_code(StatusCode(code))
                .with_header(
                    "Content-Type: application/json"
                        .parse::<tiny_http::Header>()
                        .expect("header"),
                );
            let _ = req.respond(response);
        }
    });

    FakeBridge { url, requests }
}

pub type LocalController = CounterController<WalletAdapter, CounterContractAdapter, OverlayWidget>;

/// Counter controller over the in-process backends, reporting to a real
/// overlay registered under the default widget id.
pub struct LocalHarness {
    pub wallet: LocalWallet,
    pub contract: LocalCounterContract,
    pub overlay: OverlayWidget,
    pub controller: LocalController,
}

pub fn local_harness(count: u32) -> LocalHarness {
    let wallet = LocalWallet::default();
    let contract = LocalCounterContract::with_count(count);
    let host = OverlayHost::new();
    let overlay = host.widget(DEFAULT_WIDGET_ID);

    let registry = Arc::new(WidgetRegistry::with_factory(move |id| host.widget(id)));
    let backends = Backends::local(wallet.clone(), contract.clone());
    let controller =
        CounterController::new(backends.wallet, backends.contract, Feedback::new(registry));

    LocalHarness {
        wallet,
        contract,
        overlay,
        controller,
    }
}

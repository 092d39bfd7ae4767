#![allow(dead_code)]

use apsan_gateway::domain::error::GatewayError;
use apsan_gateway::domain::gateway::{GatewayClient, GatewayResponse, Route};
use apsan_gateway::domain::id::TransactionId;
use apsan_gateway::domain::invoice::Invoice;
use apsan_gateway::domain::money::Amount;
use apsan_gateway::{GatewaySettings, TransactionAdapter};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

pub const BANK_URL: &str = "https://bank.test/api/";
pub const REDIRECT_URI: &str = "https://shop.test/callback";
pub const TERMINAL_ID: &str = "T-1001";

/// Fixed invoice UUID so checksums are predictable.
pub const INVOICE_UUID: &str = "0190a5b8-7c1e-7a4d-9f00-3c2d8e1a6b55";
/// `crc32(INVOICE_UUID)` in decimal.
pub const INVOICE_UNIQUE_ID: &str = "230828784";

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn settings() -> GatewaySettings {
    GatewaySettings::new(BANK_URL, TERMINAL_ID, REDIRECT_URI, "merchant", "secret")
}

pub fn invoice(toman: u64) -> Invoice {
    Invoice::new(Amount::new(toman).unwrap()).with_uuid(Uuid::parse_str(INVOICE_UUID).unwrap())
}

/// An invoice as it looks when the user comes back from the bank page.
pub fn purchased_invoice(toman: u64, token: &str) -> Invoice {
    invoice(toman).with_transaction_id(TransactionId::new(token).unwrap())
}

pub fn adapter(invoice: Invoice, gateway: &Arc<FakeGateway>) -> TransactionAdapter {
    init_tracing();
    let client: Arc<dyn GatewayClient> = gateway.clone();
    TransactionAdapter::new(invoice, settings(), client)
}

// ── Fake gateway ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub route: Route,
    pub payload: serde_json::Value,
}

/// Scripted `GatewayClient`: answers each route from a queue and records
/// every call. An unscripted call panics so tests notice stray requests.
#[derive(Default)]
pub struct FakeGateway {
    responses: Mutex<HashMap<Route, VecDeque<GatewayResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, route: Route, status: u16, body: serde_json::Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(route)
            .or_default()
            .push_back(GatewayResponse::new(status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn payloads(&self, route: Route) -> Vec<serde_json::Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.route == route)
            .map(|c| c.payload)
            .collect()
    }

    pub fn count(&self, route: Route) -> usize {
        self.payloads(route).len()
    }
}

impl GatewayClient for FakeGateway {
    fn call(
        &self,
        route: Route,
        payload: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<GatewayResponse, GatewayError>> + Send + '_>> {
        self.calls.lock().unwrap().push(RecordedCall {
            route,
            payload,
        });
        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted response for {route}"));
        Box::pin(async move { Ok(response) })
    }
}

// ── Canned bodies ──────────────────────────────────────────────────────────

pub fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({ "result": token })
}

pub fn ack_body(acknowledged: bool, grant_id: &str) -> serde_json::Value {
    serde_json::json!({ "result": { "acknowledged": acknowledged, "grantId": grant_id } })
}

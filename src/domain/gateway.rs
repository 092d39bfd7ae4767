use {
    super::error::GatewayError,
    std::{fmt, future::Future, pin::Pin},
};

/// Endpoints relative to the bank API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Token,
    Payment,
    Acknowledge,
    Rollback,
    Refund,
    NoLimitRefund,
    /// Published by the bank; no lifecycle operation calls it.
    TransactionStatus,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "Token",
            Self::Payment => "payment",
            Self::Acknowledge => "acknowledge",
            Self::Rollback => "rollback",
            Self::Refund => "refund",
            Self::NoLimitRefund => "nolimitrefund",
            Self::TransactionStatus => "transaction/status",
        }
    }

    /// Absolute URL under `base`, tolerating a base with or without a
    /// trailing slash.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.as_str())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status and decoded body of one gateway call. Owned by the caller that
/// made the call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Authenticated JSON POST to the bank. Non-2xx statuses come back as
/// `Ok(GatewayResponse)`; only transport failures are `Err`.
pub trait GatewayClient: Send + Sync {
    fn call(
        &self,
        route: Route,
        payload: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<GatewayResponse, GatewayError>> + Send + '_>>;
}

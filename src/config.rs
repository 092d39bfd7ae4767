use {
    crate::domain::error::GatewayError,
    std::{env, fmt, time::Duration},
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Per-merchant Apsan settings. Immutable for the life of an adapter.
#[derive(Clone)]
pub struct GatewaySettings {
    pub bank_api_url: String,
    pub terminal_id: String,
    pub redirect_uri: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl GatewaySettings {
    pub fn new(
        bank_api_url: impl Into<String>,
        terminal_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            bank_api_url: bank_api_url.into(),
            terminal_id: terminal_id.into(),
            redirect_uri: redirect_uri.into(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `APSAN_*` variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();

        let timeout = match env::var("APSAN_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                GatewayError::Config(format!("APSAN_TIMEOUT_SECS must be an integer: {e}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(
            required("APSAN_BANK_API_URL")?,
            required("APSAN_TERMINAL_ID")?,
            required("APSAN_REDIRECT_URI")?,
            required("APSAN_USERNAME")?,
            required("APSAN_PASSWORD")?,
        )
        .with_timeout(Duration::from_secs(timeout)))
    }

    /// Callback URL for one invoice: `redirect_uri/<unique id>`.
    pub fn callback_url(&self, unique_id: &str) -> String {
        format!("{}/{unique_id}", self.redirect_uri)
    }
}

fn required(key: &str) -> Result<String, GatewayError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GatewayError::Config(format!("{key} must be set"))),
    }
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("bank_api_url", &self.bank_api_url)
            .field("terminal_id", &self.terminal_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

use {
    crate::{
        config::GatewaySettings,
        domain::{
            error::GatewayError,
            gateway::{GatewayClient, GatewayResponse, Route},
        },
    },
    reqwest::header::CONTENT_TYPE,
    std::{future::Future, pin::Pin},
};

/// `GatewayClient` over HTTPS with Basic auth on every request.
pub struct HttpGatewayClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpGatewayClient {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: &GatewaySettings, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: settings.bank_api_url.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }
}

impl GatewayClient for HttpGatewayClient {
    fn call(
        &self,
        route: Route,
        payload: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<GatewayResponse, GatewayError>> + Send + '_>> {
        Box::pin(async move { self.call_inner(route, payload).await })
    }
}

impl HttpGatewayClient {
    async fn call_inner(
        &self,
        route: Route,
        payload: serde_json::Value,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = route.url(&self.base_url);

        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await
            .inspect_err(|e| tracing::error!(route = %route, error = %e, "apsan transport failure"))?;

        let status = resp.status().as_u16();
        let raw = resp.text().await?;
        tracing::debug!(route = %route, status, "apsan call completed");

        Ok(GatewayResponse::new(status, decode_body(route, &raw)))
    }
}

/// Error pages and empty bodies decode to `null` so the status still reaches
/// the translator.
fn decode_body(route: Route, raw: &str) -> serde_json::Value {
    if raw.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(route = %route, error = %e, "non-JSON body from apsan, ignoring");
        serde_json::Value::Null
    })
}

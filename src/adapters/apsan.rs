pub mod messages;
pub mod payload;

use {
    self::{
        messages::MessageTable,
        payload::{
            AcknowledgeResponse, NoLimitRefundRequest, RefundRequest, TokenRef, TokenRequest,
            TokenResponse,
        },
    },
    crate::{
        adapters::apsan_client::HttpGatewayClient,
        config::GatewaySettings,
        domain::{
            driver::Driver,
            error::GatewayError,
            gateway::{GatewayClient, GatewayResponse, Route},
            id::TransactionId,
            invoice::Invoice,
            receipt::Receipt,
            redirect::{FormMethod, RedirectionForm},
            state::TransactionState,
        },
    },
    serde::Serialize,
    std::{future::Future, pin::Pin, sync::Arc},
};

pub const DRIVER_NAME: &str = "apsan";

/// Drives one invoice through the Apsan lifecycle. Build one per transaction.
pub struct TransactionAdapter {
    invoice: Invoice,
    settings: GatewaySettings,
    client: Arc<dyn GatewayClient>,
    messages: MessageTable,
    state: TransactionState,
}

impl TransactionAdapter {
    /// An invoice that already carries a transaction id resumes at
    /// `TokenIssued`, which is how the verify callback is handled.
    pub fn new(invoice: Invoice, settings: GatewaySettings, client: Arc<dyn GatewayClient>) -> Self {
        let state = if invoice.transaction_id().is_some() {
            TransactionState::TokenIssued
        } else {
            TransactionState::Created
        };
        Self {
            invoice,
            settings,
            client,
            messages: MessageTable::default(),
            state,
        }
    }

    /// Adapter talking to the real bank over HTTP.
    pub fn connect(invoice: Invoice, settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = HttpGatewayClient::new(&settings)?;
        Ok(Self::new(invoice, settings, Arc::new(client)))
    }

    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn into_invoice(self) -> Invoice {
        self.invoice
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Cancel the token. `Ok(true)` only on HTTP 200.
    #[tracing::instrument(name = "apsan.rollback", skip_all, fields(invoice = %self.invoice.uuid()))]
    pub async fn rollback(&mut self) -> Result<bool, GatewayError> {
        let token = self.require_transaction_id("rollback")?;
        self.ensure_can_enter(TransactionState::RolledBack, "rollback")?;

        let response = self
            .send(Route::Rollback, &TokenRef { token: token.as_str() })
            .await?;
        let ok = self.messages.translate(response.status, true)?;

        self.state.transition(TransactionState::RolledBack)?;
        tracing::info!(transaction_id = %token, "transaction rolled back");
        Ok(ok)
    }

    /// Refund the full invoice amount within the terminal's limits.
    #[tracing::instrument(name = "apsan.refund", skip_all, fields(invoice = %self.invoice.uuid()))]
    pub async fn refund(&mut self) -> Result<bool, GatewayError> {
        let token = self.require_transaction_id("refund")?;
        self.ensure_can_enter(TransactionState::Refunded, "refund")?;

        let amount = self.invoice.amount().to_rial()?;
        let unique_id = self.invoice.resolve_unique_id();
        let response = self
            .send(
                Route::Refund,
                &RefundRequest {
                    amount,
                    unique_identifier: unique_id.as_str(),
                    res_num: "",
                },
            )
            .await?;
        let ok = self.messages.translate(response.status, true)?;

        self.state.transition(TransactionState::Refunded)?;
        tracing::info!(transaction_id = %token, amount, "transaction refunded");
        Ok(ok)
    }

    /// Refund bypassing the terminal's limits, keyed by the receipt's grant id.
    #[tracing::instrument(name = "apsan.refund_unlimited", skip_all, fields(invoice = %self.invoice.uuid()))]
    pub async fn refund_without_limitation(
        &mut self,
        reference_id: &str,
    ) -> Result<bool, GatewayError> {
        if reference_id.trim().is_empty() {
            return Err(GatewayError::Validation(
                "reference id must not be empty".to_string(),
            ));
        }
        let token = self.require_transaction_id("refund_without_limitation")?;
        self.ensure_can_enter(TransactionState::RefundedUnlimited, "refund_without_limitation")?;

        let amount = self.invoice.amount().to_rial()?;
        let response = self
            .send(
                Route::NoLimitRefund,
                &NoLimitRefundRequest {
                    amount,
                    grant_id: reference_id,
                    res_num: "",
                },
            )
            .await?;
        let ok = self.messages.translate(response.status, true)?;

        self.state.transition(TransactionState::RefundedUnlimited)?;
        tracing::info!(transaction_id = %token, grant_id = reference_id, amount, "transaction refunded without limitation");
        Ok(ok)
    }

    #[tracing::instrument(name = "apsan.purchase", skip_all, fields(invoice = %self.invoice.uuid()))]
    async fn purchase_inner(&mut self) -> Result<TransactionId, GatewayError> {
        if let Some(existing) = self.invoice.transaction_id() {
            return Err(GatewayError::Precondition(format!(
                "purchase already issued transaction id {existing}"
            )));
        }
        self.ensure_can_enter(TransactionState::TokenIssued, "purchase")?;

        let unique_id = self.invoice.resolve_unique_id();
        let request = TokenRequest {
            amount: self.invoice.amount().to_rial()?,
            redirect_uri: self.settings.callback_url(unique_id.as_str()),
            terminal_id: &self.settings.terminal_id,
            unique_identifier: unique_id.as_str(),
        };
        let response = self.send(Route::Token, &request).await?;

        // No token exists yet, so there is nothing to compensate.
        if !response.is_ok() {
            tracing::warn!(status = response.status, "token request rejected");
            return Err(self.messages.reject(response.status));
        }

        let token: TokenResponse = serde_json::from_value(response.body).map_err(|e| {
            GatewayError::UnexpectedResponse(format!("token response without result: {e}"))
        })?;
        let transaction_id = TransactionId::new(token.result)
            .map_err(|_| GatewayError::UnexpectedResponse("token response with empty result".into()))?;

        self.invoice.set_transaction_id(transaction_id.clone())?;
        self.state.transition(TransactionState::TokenIssued)?;
        tracing::info!(transaction_id = %transaction_id, unique_id = %unique_id, "token issued");
        Ok(transaction_id)
    }

    #[tracing::instrument(name = "apsan.verify", skip_all, fields(invoice = %self.invoice.uuid()))]
    async fn verify_inner(&mut self) -> Result<Receipt, GatewayError> {
        let token = self.require_transaction_id("verify")?;
        self.ensure_can_enter(TransactionState::Verified, "verify")?;

        let response = self
            .send(Route::Acknowledge, &TokenRef { token: token.as_str() })
            .await?;

        if let Some(grant_id) = acknowledged_grant(&response) {
            self.state.transition(TransactionState::Verified)?;
            tracing::info!(transaction_id = %token, grant_id = %grant_id, "payment acknowledged");
            return Ok(Receipt::new(DRIVER_NAME, grant_id));
        }

        // The raised error reflects the acknowledge status, never the rollback's.
        let verify_status = response.status;
        tracing::warn!(
            transaction_id = %token,
            status = verify_status,
            "acknowledge failed, rolling back"
        );
        if let Err(e) = self.rollback().await {
            tracing::warn!(
                transaction_id = %token,
                error = %e,
                "rollback after failed acknowledge did not succeed"
            );
        }

        Err(self.messages.reject(verify_status))
    }

    fn pay_form(&self) -> Result<RedirectionForm, GatewayError> {
        let token = self.require_transaction_id("pay")?;
        if self.state != TransactionState::TokenIssued {
            return Err(GatewayError::Precondition(format!(
                "pay called on a {} transaction",
                self.state
            )));
        }
        Ok(
            RedirectionForm::new(Route::Payment.url(&self.settings.bank_api_url), FormMethod::Post)
                .with_input("token", token.as_str()),
        )
    }

    async fn send<T: Serialize>(
        &self,
        route: Route,
        payload: &T,
    ) -> Result<GatewayResponse, GatewayError> {
        let payload = serde_json::to_value(payload)?;
        self.client.call(route, payload).await
    }

    fn require_transaction_id(&self, operation: &str) -> Result<TransactionId, GatewayError> {
        self.invoice.transaction_id().cloned().ok_or_else(|| {
            GatewayError::Precondition(format!(
                "{operation} requires a transaction id; call purchase first"
            ))
        })
    }

    fn ensure_can_enter(
        &self,
        next: TransactionState,
        operation: &str,
    ) -> Result<(), GatewayError> {
        if self.state.can_transition_to(&next) {
            return Ok(());
        }
        Err(GatewayError::Precondition(format!(
            "{operation} not allowed from state {}",
            self.state
        )))
    }
}

/// The grant id, iff the bank answered 200 with `acknowledged: true`.
fn acknowledged_grant(response: &GatewayResponse) -> Option<String> {
    if !response.is_ok() {
        return None;
    }
    let ack: AcknowledgeResponse = match serde_json::from_value(response.body.clone()) {
        Ok(ack) => ack,
        Err(e) => {
            tracing::warn!(error = %e, "acknowledge body did not match the expected shape");
            return None;
        }
    };
    if !ack.result.acknowledged {
        return None;
    }
    ack.result.grant_id.filter(|g| !g.is_empty())
}

impl Driver for TransactionAdapter {
    fn purchase(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<TransactionId, GatewayError>> + Send + '_>> {
        Box::pin(self.purchase_inner())
    }

    fn pay(&self) -> Result<RedirectionForm, GatewayError> {
        self.pay_form()
    }

    fn verify(&mut self)
    -> Pin<Box<dyn Future<Output = Result<Receipt, GatewayError>> + Send + '_>> {
        Box::pin(self.verify_inner())
    }
}

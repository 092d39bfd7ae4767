use {
    super::error::GatewayError,
    super::id::TransactionId,
    super::receipt::Receipt,
    super::redirect::RedirectionForm,
    std::{future::Future, pin::Pin},
};

/// Capabilities a host payment orchestrator expects from a bank driver.
pub trait Driver: Send {
    /// Mint a transaction token and record it on the invoice.
    fn purchase(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<TransactionId, GatewayError>> + Send + '_>>;

    /// Where to send the user to complete the payment.
    fn pay(&self) -> Result<RedirectionForm, GatewayError>;

    /// Confirm the payment after the user returns from the bank.
    fn verify(&mut self)
    -> Pin<Box<dyn Future<Output = Result<Receipt, GatewayError>> + Send + '_>>;
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The bank rejected the operation. Carries the localized message.
    #[error("invalid payment: {0}")]
    InvalidPayment(String),

    /// Operation invoked before the step it depends on.
    #[error("precondition: {0}")]
    Precondition(String),

    #[error("validation: {0}")]
    Validation(String),

    /// A 2xx response whose body lacks a field the lifecycle needs.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    #[error("config: {0}")]
    Config(String),

    /// DNS, connect, timeout, reset. Never translated.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// The user-facing message when the bank rejected the operation.
    pub fn payment_message(&self) -> Option<&str> {
        match self {
            Self::InvalidPayment(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

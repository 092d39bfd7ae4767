use {
    super::error::GatewayError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Created,
    TokenIssued,
    Verified,
    RolledBack,
    Refunded,
    RefundedUnlimited,
}

impl TransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::TokenIssued => "token_issued",
            Self::Verified => "verified",
            Self::RolledBack => "rolled_back",
            Self::Refunded => "refunded",
            Self::RefundedUnlimited => "refunded_unlimited",
        }
    }

    /// Allowed lifecycle edges. An adapter rebuilt over an already-purchased
    /// invoice starts at `TokenIssued` and cannot tell whether the payment was
    /// verified in an earlier process, so refunds are accepted from there too.
    pub fn can_transition_to(&self, next: &TransactionState) -> bool {
        use TransactionState::*;
        matches!(
            (self, next),
            (Created, TokenIssued)
                | (TokenIssued, Verified)
                | (TokenIssued, RolledBack)
                | (TokenIssued, Refunded)
                | (TokenIssued, RefundedUnlimited)
                | (Verified, Refunded)
                | (Verified, RefundedUnlimited)
                | (Refunded, RefundedUnlimited)
                | (RefundedUnlimited, Refunded)
        )
    }

    pub fn transition(&mut self, next: TransactionState) -> Result<(), GatewayError> {
        if !self.can_transition_to(&next) {
            return Err(GatewayError::Precondition(format!(
                "invalid transaction transition: {self} → {next}"
            )));
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TransactionState {
    type Error = GatewayError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "created" => Ok(Self::Created),
            "token_issued" => Ok(Self::TokenIssued),
            "verified" => Ok(Self::Verified),
            "rolled_back" => Ok(Self::RolledBack),
            "refunded" => Ok(Self::Refunded),
            "refunded_unlimited" => Ok(Self::RefundedUnlimited),
            other => Err(GatewayError::Validation(format!(
                "unknown transaction state: {other}"
            ))),
        }
    }
}

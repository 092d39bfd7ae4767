use {
    chrono::{DateTime, Utc},
    serde::Serialize,
};

/// Proof that the bank acknowledged the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    driver: String,
    reference_id: String,
    issued_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(driver: impl Into<String>, reference_id: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            reference_id: reference_id.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// The bank's `grantId`. Pass it to `refund_without_limitation`.
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

use {
    super::error::GatewayError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Toman-to-rial factor. The bank only ever sees rial.
pub const RIAL_PER_TOMAN: u64 = 10;

/// Invoice amount in toman. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    pub fn new(toman: u64) -> Result<Self, GatewayError> {
        if toman == 0 {
            return Err(GatewayError::Validation(
                "Amount must be positive, got: 0".to_string(),
            ));
        }
        Ok(Self(toman))
    }

    pub fn toman(&self) -> u64 {
        self.0
    }

    /// Wire amount sent to the bank.
    pub fn to_rial(&self) -> Result<u64, GatewayError> {
        self.0.checked_mul(RIAL_PER_TOMAN).ok_or_else(|| {
            GatewayError::Validation(format!("Amount overflows when converted to rial: {}", self.0))
        })
    }
}

impl TryFrom<u64> for Amount {
    type Error = GatewayError;

    fn try_from(toman: u64) -> Result<Self, Self::Error> {
        Self::new(toman)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> u64 {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

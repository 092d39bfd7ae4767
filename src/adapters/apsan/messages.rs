use {crate::domain::error::GatewayError, std::collections::BTreeMap};

pub const BAD_REQUEST: &str = "خطا در ورودی‌های درخواست یا انجام عملیات";
pub const UNAUTHORIZED: &str = "خطا در اطلاعات کاربری یا رمز عبور";
pub const INTERNAL_ERROR: &str = "خطایی در سیستم رخ داده است";
pub const UNKNOWN_ERROR: &str = "یک خطای ناشناخته در سیستم رخ داده است.";

/// Status code → user-facing message. Swap it to change locale without
/// touching the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    messages: BTreeMap<u16, String>,
    fallback: String,
}

impl MessageTable {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            messages: BTreeMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Messages the bank documents, in Persian.
    pub fn persian() -> Self {
        Self::new(UNKNOWN_ERROR)
            .with_message(400, BAD_REQUEST)
            .with_message(401, UNAUTHORIZED)
            .with_message(500, INTERNAL_ERROR)
    }

    pub fn with_message(mut self, status: u16, message: impl Into<String>) -> Self {
        self.messages.insert(status, message.into());
        self
    }

    pub fn message(&self, status: u16) -> &str {
        self.messages
            .get(&status)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn reject(&self, status: u16) -> GatewayError {
        GatewayError::InvalidPayment(self.message(status).to_string())
    }

    /// `Ok(true)` only when `strict_success_only` and the status is 200.
    /// Every other combination is an `InvalidPayment` error, including 200
    /// in non-strict mode, which falls through to the fallback message.
    pub fn translate(&self, status: u16, strict_success_only: bool) -> Result<bool, GatewayError> {
        if strict_success_only && status == 200 {
            return Ok(true);
        }
        Err(self.reject(status))
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::persian()
    }
}

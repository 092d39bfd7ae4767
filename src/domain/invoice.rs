use {
    super::error::GatewayError,
    super::id::{TransactionId, UniqueId},
    super::money::Amount,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
    uuid::Uuid,
};

/// Detail key under which the gateway unique identifier is cached.
pub const UNIQUE_ID_DETAIL: &str = "uuid";

/// Caller-owned invoice. The adapter borrows it mutably to record the
/// transaction id and the cached unique identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    amount: Amount,
    uuid: Uuid,
    transaction_id: Option<TransactionId>,
    details: BTreeMap<String, String>,
}

impl Invoice {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            uuid: Uuid::now_v7(),
            transaction_id: None,
            details: BTreeMap::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Rebuild an invoice that already went through `purchase`, e.g. when the
    /// user comes back from the bank page.
    pub fn with_transaction_id(mut self, id: TransactionId) -> Self {
        self.transaction_id = Some(id);
        self
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn set_detail(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.details.insert(key.into(), value.into());
    }

    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// Set once. A second call is an ordering bug in the caller.
    pub fn set_transaction_id(&mut self, id: TransactionId) -> Result<(), GatewayError> {
        if let Some(existing) = &self.transaction_id {
            return Err(GatewayError::Precondition(format!(
                "invoice {} already has transaction id {existing}",
                self.uuid
            )));
        }
        self.transaction_id = Some(id);
        Ok(())
    }

    /// Cached `uuid` detail if present, otherwise the CRC-32 of the invoice
    /// UUID, which is then cached. Repeated calls return the same value.
    pub fn resolve_unique_id(&mut self) -> UniqueId {
        if let Some(cached) = self
            .detail(UNIQUE_ID_DETAIL)
            .and_then(|v| UniqueId::new(v).ok())
        {
            return cached;
        }
        let id = UniqueId::from_uuid(&self.uuid);
        self.set_detail(UNIQUE_ID_DETAIL, id.as_str());
        id
    }
}

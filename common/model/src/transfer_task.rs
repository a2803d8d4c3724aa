use chrono::{DateTime, Utc};
use ledger_decimal::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending real-world transfer implied by a virtual move that crossed
/// physical-account boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTask {
    pub id: Uuid,
    pub related_transaction_id: Uuid,
    pub from_physical_bucket_id: Uuid,
    pub to_physical_bucket_id: Uuid,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub completing_transaction_id: Option<Uuid>,
}

impl TransferTask {
    pub fn new(
        id: Uuid,
        related_transaction_id: Uuid,
        from_physical_bucket_id: Uuid,
        to_physical_bucket_id: Uuid,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        TransferTask {
            id,
            related_transaction_id,
            from_physical_bucket_id,
            to_physical_bucket_id,
            amount,
            created_at,
            completed: false,
            completing_transaction_id: None,
        }
    }

    pub fn complete(&mut self, completing_transaction_id: Uuid) {
        self.completed = true;
        self.completing_transaction_id = Some(completing_transaction_id);
    }
}

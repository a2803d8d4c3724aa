use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of bucket roles. The type gates which fields may be present
/// (a `parent` reference) and which operations accept the bucket, enforced
/// at the service boundary rather than through subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketType {
    Physical,
    Virtual,
    Income,
    Expense,
    Equity,
    System,
}

/// A named account-like node carrying a running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub id: Uuid,
    pub name: String,
    pub bucket_type: BucketType,
    /// Required for `Virtual`, forbidden for every other type.
    pub parent_bucket_id: Option<Uuid>,
    pub current_balance: Money,
}

impl Bucket {
    pub fn new(id: Uuid, name: impl Into<String>, bucket_type: BucketType, parent_bucket_id: Option<Uuid>) -> LedgerResult<Self> {
        let bucket = Bucket {
            id,
            name: name.into(),
            bucket_type,
            parent_bucket_id,
            current_balance: Money::ZERO,
        };
        bucket.validate()?;
        Ok(bucket)
    }

    /// name non-empty; `Virtual` requires a parent; every other type forbids one.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::InvalidIdentifier {
                raw: format!("bucket {} has an empty name", self.id),
            });
        }
        match self.bucket_type {
            BucketType::Virtual if self.parent_bucket_id.is_none() => {
                Err(LedgerError::InvalidRule {
                    source_bucket_id: self.id,
                    reason: "virtual bucket requires a parent physical bucket".into(),
                })
            }
            BucketType::Virtual => Ok(()),
            _ if self.parent_bucket_id.is_some() => Err(LedgerError::InvalidRule {
                source_bucket_id: self.id,
                reason: "only virtual buckets may reference a parent bucket".into(),
            }),
            _ => Ok(()),
        }
    }

    pub fn is_type(&self, expected: BucketType) -> bool {
        self.bucket_type == expected
    }

    pub fn require_type(&self, expected: BucketType, label: &'static str) -> LedgerResult<()> {
        if self.is_type(expected) {
            Ok(())
        } else {
            Err(LedgerError::InvalidType {
                bucket_id: self.id,
                expected: label,
                actual: format!("{:?}", self.bucket_type),
            })
        }
    }
}

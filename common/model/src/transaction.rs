use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryDirection {
    Debit,
    Credit,
}

/// The view an entry participates in. Each layer present in a transaction
/// must balance independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Physical,
    Virtual,
}

/// One posted movement against a bucket. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub bucket_id: Uuid,
    pub amount: Money,
    pub direction: EntryDirection,
    pub layer: Layer,
}

impl Entry {
    pub fn new(
        id: Uuid,
        transaction_id: Uuid,
        bucket_id: Uuid,
        amount: Money,
        direction: EntryDirection,
        layer: Layer,
    ) -> LedgerResult<Self> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: amount.to_string(),
            });
        }
        Ok(Entry {
            id,
            transaction_id,
            bucket_id,
            amount,
            direction,
            layer,
        })
    }

    /// DEBIT increases a bucket's running balance, CREDIT decreases it.
    pub fn signed_delta(&self) -> Money {
        match self.direction {
            EntryDirection::Debit => self.amount,
            EntryDirection::Credit => Money::ZERO - self.amount,
        }
    }
}

/// The transaction header plus its ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub is_internal_transfer: bool,
    pub is_external_inflow: bool,
    pub entries: Vec<Entry>,
}

impl Transaction {
    pub fn new(
        id: Uuid,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
        is_internal_transfer: bool,
        is_external_inflow: bool,
        entries: Vec<Entry>,
    ) -> LedgerResult<Self> {
        let transaction = Transaction {
            id,
            description: description.into(),
            created_at,
            is_internal_transfer,
            is_external_inflow,
            entries,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    /// At least one entry, every amount strictly positive (already enforced
    /// by [`Entry::new`]), and each layer present balances exactly.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.entries.is_empty() {
            return Err(LedgerError::InvalidRule {
                source_bucket_id: self.id,
                reason: "transaction has no entries".into(),
            });
        }

        let mut debit: HashMap<Layer, Money> = HashMap::new();
        let mut credit: HashMap<Layer, Money> = HashMap::new();
        for entry in &self.entries {
            if !entry.amount.is_positive() {
                return Err(LedgerError::InvalidAmount {
                    amount: entry.amount.to_string(),
                });
            }
            let bucket = match entry.direction {
                EntryDirection::Debit => &mut debit,
                EntryDirection::Credit => &mut credit,
            };
            *bucket.entry(entry.layer).or_insert(Money::ZERO) += entry.amount;
        }

        for layer in [Layer::Physical, Layer::Virtual] {
            let d = debit.get(&layer).copied().unwrap_or(Money::ZERO);
            let c = credit.get(&layer).copied().unwrap_or(Money::ZERO);
            if d != c {
                return Err(LedgerError::LayerImbalance {
                    transaction_id: self.id,
                    layer: layer_label(layer),
                    debit: d.to_string(),
                    credit: c.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn entries_in_layer(&self, layer: Layer) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.layer == layer)
    }
}

fn layer_label(layer: Layer) -> &'static str {
    match layer {
        Layer::Physical => "PHYSICAL",
        Layer::Virtual => "VIRTUAL",
    }
}

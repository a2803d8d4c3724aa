use ledger_constants::{PERCENT_MAX, PERCENT_MIN};
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Split-rule item distribution kind. A single field carries a
/// kind-dependent value. `Remainder` ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitItemKind {
    Fixed,
    Percent,
    Remainder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRuleItem {
    pub id: Uuid,
    pub target_bucket_id: Uuid,
    pub kind: SplitItemKind,
    pub value: Decimal,
    pub priority: i32,
}

impl SplitRuleItem {
    pub fn fixed(id: Uuid, target_bucket_id: Uuid, value: Money, priority: i32) -> LedgerResult<Self> {
        if !value.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: value.to_string(),
            });
        }
        Ok(SplitRuleItem {
            id,
            target_bucket_id,
            kind: SplitItemKind::Fixed,
            value: value.inner(),
            priority,
        })
    }

    pub fn percent(id: Uuid, target_bucket_id: Uuid, value: Decimal, priority: i32) -> LedgerResult<Self> {
        if value < Decimal::from(PERCENT_MIN) || value > Decimal::from(PERCENT_MAX) {
            return Err(LedgerError::OutOfRange {
                value: value.to_string(),
                min: PERCENT_MIN.to_string(),
                max: PERCENT_MAX.to_string(),
            });
        }
        Ok(SplitRuleItem {
            id,
            target_bucket_id,
            kind: SplitItemKind::Percent,
            value,
            priority,
        })
    }

    pub fn remainder(id: Uuid, target_bucket_id: Uuid, priority: i32) -> Self {
        SplitRuleItem {
            id,
            target_bucket_id,
            kind: SplitItemKind::Remainder,
            value: Decimal::ZERO,
            priority,
        }
    }
}

/// An ordered collection of distribution items attached to an income bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRule {
    pub id: Uuid,
    pub source_bucket_id: Uuid,
    pub items: Vec<SplitRuleItem>,
}

impl SplitRule {
    pub fn new(id: Uuid, source_bucket_id: Uuid, items: Vec<SplitRuleItem>) -> LedgerResult<Self> {
        let rule = SplitRule {
            id,
            source_bucket_id,
            items,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// At least one item, exactly one REMAINDER; per-item value bounds are
    /// enforced at construction time by [`SplitRuleItem::fixed`]/`percent`.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.items.is_empty() {
            return Err(LedgerError::InvalidRule {
                source_bucket_id: self.source_bucket_id,
                reason: "split rule has no items".into(),
            });
        }
        let remainder_count = self
            .items
            .iter()
            .filter(|item| item.kind == SplitItemKind::Remainder)
            .count();
        if remainder_count != 1 {
            return Err(LedgerError::InvalidRule {
                source_bucket_id: self.source_bucket_id,
                reason: format!("expected exactly one REMAINDER item, found {remainder_count}"),
            });
        }
        Ok(())
    }

    /// Items sorted by ascending priority, ties broken by original (input)
    /// order. A stable sort over the index-tagged copy.
    pub fn items_by_priority(&self) -> Vec<&SplitRuleItem> {
        let mut indexed: Vec<(usize, &SplitRuleItem)> = self.items.iter().enumerate().collect();
        indexed.sort_by_key(|(idx, item)| (item.priority, *idx));
        indexed.into_iter().map(|(_, item)| item).collect()
    }
}

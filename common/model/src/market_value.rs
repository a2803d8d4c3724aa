use chrono::{DateTime, Utc};
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An externally observed valuation for an `Equity` bucket, append-only.
/// The "latest" per bucket is the one with the highest `observed_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketValuePoint {
    pub id: Uuid,
    pub bucket_id: Uuid,
    pub observed_at: DateTime<Utc>,
    pub market_value: Money,
}

impl MarketValuePoint {
    pub fn new(id: Uuid, bucket_id: Uuid, observed_at: DateTime<Utc>, market_value: Money) -> LedgerResult<Self> {
        if !market_value.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: market_value.to_string(),
            });
        }
        Ok(MarketValuePoint {
            id,
            bucket_id,
            observed_at,
            market_value,
        })
    }
}

/// Picks the point with the highest `observed_at`; ties keep the first seen.
pub fn latest<'a>(points: impl IntoIterator<Item = &'a MarketValuePoint>) -> Option<&'a MarketValuePoint> {
    points
        .into_iter()
        .fold(None, |best: Option<&MarketValuePoint>, point| match best {
            Some(current) if current.observed_at >= point.observed_at => Some(current),
            _ => Some(point),
        })
}

use chrono::Utc;
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::MarketValuePoint;
use ledger_repository::{LedgerStore, PostingUnitOfWork};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Appends a market-value observation for an EQUITY bucket. Does not touch
/// the bucket's running balance (its book value). Only `getNetWorth`'s
/// equity figure moves.
pub async fn update_market_value<S: LedgerStore>(
    store: &S,
    bucket_id: Uuid,
    value: Money,
    cancel: &CancellationToken,
) -> LedgerResult<MarketValuePoint> {
    if !value.is_positive() {
        return Err(LedgerError::InvalidAmount {
            amount: value.to_string(),
        });
    }

    let mut uow = store.begin(cancel).await?;
    uow.get_bucket(bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", bucket_id.to_string()))?;

    let point = MarketValuePoint::new(Uuid::new_v4(), bucket_id, Utc::now(), value)?;
    uow.append_market_value(&point, cancel).await?;
    uow.commit(cancel).await?;

    tracing::info!(bucket_id = %bucket_id, market_value = %value, "updated market value");
    Ok(point)
}

/// `latest market value - current book value`, or zero if the bucket has
/// no market-value history yet. A graceful default, not an error.
pub async fn calculate_profit<S: LedgerStore>(store: &S, bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Money> {
    let bucket = store
        .get_bucket(bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", bucket_id.to_string()))?;
    let latest = store.latest_market_value(bucket_id, cancel).await?;
    Ok(match latest {
        Some(point) => point.market_value - bucket.current_balance,
        None => Money::ZERO,
    })
}

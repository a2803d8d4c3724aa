use std::collections::HashMap;

use ledger_decimal::Money;
use ledger_errors::LedgerResult;
use ledger_model::{Bucket, BucketType, Transaction};
use ledger_repository::LedgerStore;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Liquidity (sum of PHYSICAL balances), equity (sum of the latest market
/// value per EQUITY bucket), and their total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetWorth {
    pub liquidity: Money,
    pub equity: Money,
    pub total: Money,
}

pub async fn get_net_worth<S: LedgerStore>(store: &S, cancel: &CancellationToken) -> LedgerResult<NetWorth> {
    let physical_buckets = store.list_buckets(Some(BucketType::Physical), cancel).await?;
    let liquidity: Money = physical_buckets.iter().map(|b| b.current_balance).sum();

    let equity_buckets = store.list_buckets(Some(BucketType::Equity), cancel).await?;
    let mut equity = Money::ZERO;
    for bucket in &equity_buckets {
        if let Some(point) = store.latest_market_value(bucket.id, cancel).await? {
            equity += point.market_value;
        }
    }

    Ok(NetWorth {
        liquidity,
        equity,
        total: liquidity + equity,
    })
}

/// A page of transactions plus a resolved `bucket id -> name` map for every
/// bucket any of the returned transactions' entries reference.
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total_count: u64,
    pub bucket_names: HashMap<Uuid, String>,
}

pub async fn list_transactions<S: LedgerStore>(
    store: &S,
    limit: u32,
    offset: u32,
    bucket_id: Option<Uuid>,
    cancel: &CancellationToken,
) -> LedgerResult<TransactionPage> {
    let (transactions, total_count) = store.list_transactions(limit, offset, bucket_id, cancel).await?;

    let mut bucket_names = HashMap::new();
    for transaction in &transactions {
        for entry in &transaction.entries {
            if bucket_names.contains_key(&entry.bucket_id) {
                continue;
            }
            if let Some(bucket) = store.get_bucket(entry.bucket_id, cancel).await? {
                bucket_names.insert(bucket.id, bucket.name);
            }
        }
    }

    Ok(TransactionPage {
        transactions,
        total_count,
        bucket_names,
    })
}

pub async fn list_buckets<S: LedgerStore>(store: &S, filter: Option<BucketType>, cancel: &CancellationToken) -> LedgerResult<Vec<Bucket>> {
    store.list_buckets(filter, cancel).await
}

pub async fn get_bucket<S: LedgerStore>(store: &S, bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Bucket> {
    store
        .get_bucket(bucket_id, cancel)
        .await?
        .ok_or_else(|| ledger_errors::LedgerError::not_found("bucket", bucket_id.to_string()))
}

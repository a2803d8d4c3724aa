//! Storage-agnostic repository contracts. Posting services depend only on
//! [`LedgerStore`]/[`PostingUnitOfWork`], never on a concrete persistence
//! engine. Every mutating call takes the in-flight unit of work, every read
//! goes through the store directly, and every fallible call propagates a
//! caller-supplied cancellation signal down to the storage layer.

use async_trait::async_trait;
use ledger_errors::LedgerResult;
use ledger_model::{Bucket, BucketType, MarketValuePoint, SplitRule, Transaction, TransferTask};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// One atomic unit of work against the storage layer. A posting service
/// opens one via [`LedgerStore::begin`], performs all of its writes through
/// it, and either [`PostingUnitOfWork::commit`]s or
/// [`PostingUnitOfWork::rollback`]s. No entry becomes visible without its
/// sibling entries and the balance updates they imply.
#[async_trait]
pub trait PostingUnitOfWork: Send + Sync {
    /// Reads a bucket as it stands within this unit of work (i.e. including
    /// any not-yet-committed balance changes made earlier in the same
    /// operation).
    async fn get_bucket(&mut self, id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<Bucket>>;

    /// Persists a transaction header and its entries, and applies the
    /// balance-maintenance rule (§4.5): for each entry, the referenced
    /// bucket's running balance moves by `+amount` (DEBIT) or `-amount`
    /// (CREDIT), atomically with the entry's insertion.
    async fn insert_transaction(&mut self, transaction: &Transaction, cancel: &CancellationToken) -> LedgerResult<()>;

    /// Appends a market-value point. Does not touch any bucket's balance.
    async fn append_market_value(&mut self, point: &MarketValuePoint, cancel: &CancellationToken) -> LedgerResult<()>;

    /// Persists zero or more generated transfer tasks.
    async fn insert_transfer_tasks(&mut self, tasks: &[TransferTask], cancel: &CancellationToken) -> LedgerResult<()>;

    /// Inserts a bucket if (and only if) it does not already exist, keyed by
    /// its identifier. Returns `true` if it was created. Used by the system
    /// seeder; idempotent by construction.
    async fn seed_bucket_if_absent(&mut self, bucket: &Bucket, cancel: &CancellationToken) -> LedgerResult<bool>;

    async fn commit(&mut self, cancel: &CancellationToken) -> LedgerResult<()>;

    async fn rollback(&mut self, cancel: &CancellationToken) -> LedgerResult<()>;
}

/// The storage handle shared across request handlers, safe for concurrent
/// use. Read operations observe only committed state.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    type UnitOfWork: PostingUnitOfWork;

    async fn begin(&self, cancel: &CancellationToken) -> LedgerResult<Self::UnitOfWork>;

    async fn get_bucket(&self, id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<Bucket>>;

    async fn list_buckets(&self, filter: Option<BucketType>, cancel: &CancellationToken) -> LedgerResult<Vec<Bucket>>;

    async fn get_split_rule(&self, source_bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<SplitRule>>;

    async fn latest_market_value(&self, bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<MarketValuePoint>>;

    /// Most recent transactions first (timestamp descending, ties broken by
    /// identifier), optionally filtered to those touching `bucket_id`.
    /// Returns the page plus the total matching count.
    async fn list_transactions(
        &self,
        limit: u32,
        offset: u32,
        bucket_id: Option<Uuid>,
        cancel: &CancellationToken,
    ) -> LedgerResult<(Vec<Transaction>, u64)>;

    async fn list_transfer_tasks(&self, completed: Option<bool>, cancel: &CancellationToken) -> LedgerResult<Vec<TransferTask>>;
}

//! An in-memory [`LedgerStore`] implementation. This is the workspace's
//! analogue of the lending protocol's `swap_mock` / `aggregator_mock` /
//! `flash_mock` crates: a test double standing in for a real storage
//! collaborator so the core can be exercised end to end without a database.
//!
//! Atomicity is modelled coarsely: [`begin`] clones the current state, every
//! write in the unit of work mutates that clone, and [`commit`] replaces the
//! shared state with it under a single global lock. This loses true
//! isolation between concurrently open units of work (a real storage engine
//! would use row/range locks or MVCC instead) but is sufficient for the
//! sequential test suites and CLI demo this store exists for.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ledger_core::apply_entry;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::{Bucket, BucketType, MarketValuePoint, SplitRule, Transaction, TransferTask};
use ledger_repository::{LedgerStore, PostingUnitOfWork};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct State {
    buckets: HashMap<Uuid, Bucket>,
    split_rules: HashMap<Uuid, SplitRule>,
    transactions: Vec<Transaction>,
    market_values: Vec<MarketValuePoint>,
    transfer_tasks: Vec<TransferTask>,
}

fn check_cancelled(cancel: &CancellationToken) -> LedgerResult<()> {
    if cancel.is_cancelled() {
        Err(LedgerError::Unknown("operation cancelled".into()))
    } else {
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryLedgerStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        InMemoryLedgerStore {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Seeds an arbitrary bucket directly, bypassing the posting path.
    /// Intended for test fixtures, mirroring how the lending protocol's
    /// mock crates expose direct setters for scenario setup.
    pub async fn insert_bucket_for_test(&self, bucket: Bucket) {
        self.state.lock().await.buckets.insert(bucket.id, bucket);
    }

    pub async fn insert_split_rule_for_test(&self, rule: SplitRule) {
        self.state.lock().await.split_rules.insert(rule.source_bucket_id, rule);
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    type UnitOfWork = InMemoryUnitOfWork;

    async fn begin(&self, cancel: &CancellationToken) -> LedgerResult<Self::UnitOfWork> {
        check_cancelled(cancel)?;
        let staged = self.state.lock().await.clone();
        Ok(InMemoryUnitOfWork {
            store: self.state.clone(),
            staged,
        })
    }

    async fn get_bucket(&self, id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<Bucket>> {
        check_cancelled(cancel)?;
        Ok(self.state.lock().await.buckets.get(&id).cloned())
    }

    async fn list_buckets(&self, filter: Option<BucketType>, cancel: &CancellationToken) -> LedgerResult<Vec<Bucket>> {
        check_cancelled(cancel)?;
        let state = self.state.lock().await;
        Ok(state
            .buckets
            .values()
            .filter(|b| filter.is_none_or(|t| b.bucket_type == t))
            .cloned()
            .collect())
    }

    async fn get_split_rule(&self, source_bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<SplitRule>> {
        check_cancelled(cancel)?;
        Ok(self.state.lock().await.split_rules.get(&source_bucket_id).cloned())
    }

    async fn latest_market_value(&self, bucket_id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<MarketValuePoint>> {
        check_cancelled(cancel)?;
        let state = self.state.lock().await;
        let points = state.market_values.iter().filter(|p| p.bucket_id == bucket_id);
        Ok(ledger_model::latest(points).cloned())
    }

    async fn list_transactions(
        &self,
        limit: u32,
        offset: u32,
        bucket_id: Option<Uuid>,
        cancel: &CancellationToken,
    ) -> LedgerResult<(Vec<Transaction>, u64)> {
        check_cancelled(cancel)?;
        if limit == 0 {
            return Err(LedgerError::OutOfRange {
                value: "0".into(),
                min: "1".into(),
                max: "u32::MAX".into(),
            });
        }
        let state = self.state.lock().await;
        let mut matching: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|tx| match bucket_id {
                Some(id) => tx.entries.iter().any(|e| e.bucket_id == id),
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn list_transfer_tasks(&self, completed: Option<bool>, cancel: &CancellationToken) -> LedgerResult<Vec<TransferTask>> {
        check_cancelled(cancel)?;
        let state = self.state.lock().await;
        Ok(state
            .transfer_tasks
            .iter()
            .filter(|t| completed.is_none_or(|c| t.completed == c))
            .cloned()
            .collect())
    }
}

pub struct InMemoryUnitOfWork {
    store: Arc<Mutex<State>>,
    staged: State,
}

impl InMemoryUnitOfWork {
    fn bucket_mut(&mut self, id: Uuid) -> LedgerResult<&mut Bucket> {
        self.staged
            .buckets
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found("bucket", id.to_string()))
    }
}

#[async_trait]
impl PostingUnitOfWork for InMemoryUnitOfWork {
    async fn get_bucket(&mut self, id: Uuid, cancel: &CancellationToken) -> LedgerResult<Option<Bucket>> {
        check_cancelled(cancel)?;
        Ok(self.staged.buckets.get(&id).cloned())
    }

    async fn insert_transaction(&mut self, transaction: &Transaction, cancel: &CancellationToken) -> LedgerResult<()> {
        check_cancelled(cancel)?;
        transaction.validate()?;
        for entry in &transaction.entries {
            let bucket = self.bucket_mut(entry.bucket_id)?;
            apply_entry(bucket, entry);
        }
        self.staged.transactions.push(transaction.clone());
        Ok(())
    }

    async fn append_market_value(&mut self, point: &MarketValuePoint, cancel: &CancellationToken) -> LedgerResult<()> {
        check_cancelled(cancel)?;
        if !self.staged.buckets.contains_key(&point.bucket_id) {
            return Err(LedgerError::not_found("bucket", point.bucket_id.to_string()));
        }
        self.staged.market_values.push(point.clone());
        Ok(())
    }

    async fn insert_transfer_tasks(&mut self, tasks: &[TransferTask], cancel: &CancellationToken) -> LedgerResult<()> {
        check_cancelled(cancel)?;
        self.staged.transfer_tasks.extend_from_slice(tasks);
        Ok(())
    }

    async fn seed_bucket_if_absent(&mut self, bucket: &Bucket, cancel: &CancellationToken) -> LedgerResult<bool> {
        check_cancelled(cancel)?;
        if self.staged.buckets.contains_key(&bucket.id) {
            Ok(false)
        } else {
            self.staged.buckets.insert(bucket.id, bucket.clone());
            Ok(true)
        }
    }

    async fn commit(&mut self, cancel: &CancellationToken) -> LedgerResult<()> {
        check_cancelled(cancel)?;
        let mut guard = self.store.lock().await;
        *guard = std::mem::take(&mut self.staged);
        Ok(())
    }

    async fn rollback(&mut self, _cancel: &CancellationToken) -> LedgerResult<()> {
        Ok(())
    }
}

use std::collections::HashMap;

use chrono::Utc;
use ledger_allocation::allocate;
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::{Bucket, BucketType, Entry, EntryDirection, Layer, Transaction};
use ledger_repository::{LedgerStore, PostingUnitOfWork};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Records an inflow against an INCOME bucket, allocating it across the
/// source's split rule and posting a balanced transaction in both layers.
///
/// Only external inflows are supported; an internal-transfer inflow fails
/// with `Unsupported` (recording one is a non-goal here).
pub async fn record_inflow<S: LedgerStore>(
    store: &S,
    amount: Money,
    description: impl Into<String>,
    source_bucket_id: Uuid,
    is_external: bool,
    cancel: &CancellationToken,
) -> LedgerResult<Transaction> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount {
            amount: amount.to_string(),
        });
    }
    if !is_external {
        return Err(LedgerError::Unsupported {
            reason: "internal-transfer inflow is not supported".into(),
        });
    }

    let mut uow = store.begin(cancel).await?;
    let source = uow
        .get_bucket(source_bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", source_bucket_id.to_string()))?;
    source.require_type(BucketType::Income, "INCOME")?;

    let rule = store
        .get_split_rule(source_bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("split rule", source_bucket_id.to_string()))?;
    let allocations = allocate(amount, &rule)?;

    let ordered_items = rule.items_by_priority();
    let mut loaded_buckets: HashMap<Uuid, Bucket> = HashMap::new();
    let mut physical_destination_id: Option<Uuid> = None;
    for (idx, item) in ordered_items.iter().enumerate() {
        let target = uow
            .get_bucket(item.target_bucket_id, cancel)
            .await?
            .ok_or_else(|| LedgerError::not_found("bucket", item.target_bucket_id.to_string()))?;
        if !target.is_type(BucketType::Virtual) {
            return Err(LedgerError::InvalidRule {
                source_bucket_id,
                reason: format!("split rule target {} is not a VIRTUAL bucket", target.id),
            });
        }
        let parent = target.parent_bucket_id.ok_or_else(|| LedgerError::InvalidRule {
            source_bucket_id,
            reason: format!("split rule target {} has no parent physical bucket", target.id),
        })?;
        if idx == 0 {
            physical_destination_id = Some(parent);
        } else if Some(parent) != physical_destination_id {
            return Err(LedgerError::InvalidRule {
                source_bucket_id,
                reason: format!("split rule target {} does not share the first target's parent", target.id),
            });
        }
        loaded_buckets.insert(target.id, target);
    }
    let physical_destination_id = physical_destination_id.expect("rule validated to have at least one item");

    let physical_destination = uow
        .get_bucket(physical_destination_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", physical_destination_id.to_string()))?;
    loaded_buckets.insert(physical_destination.id, physical_destination);
    loaded_buckets.insert(source.id, source.clone());

    let tx_id = Uuid::new_v4();
    let mut entries = vec![
        Entry::new(Uuid::new_v4(), tx_id, physical_destination_id, amount, EntryDirection::Debit, Layer::Physical)?,
        Entry::new(Uuid::new_v4(), tx_id, source_bucket_id, amount, EntryDirection::Credit, Layer::Physical)?,
    ];
    for item in &ordered_items {
        let allocated = allocations[&item.target_bucket_id];
        entries.push(Entry::new(Uuid::new_v4(), tx_id, item.target_bucket_id, allocated, EntryDirection::Debit, Layer::Virtual)?);
    }
    entries.push(Entry::new(Uuid::new_v4(), tx_id, source_bucket_id, amount, EntryDirection::Credit, Layer::Virtual)?);

    let transaction = Transaction::new(tx_id, description, Utc::now(), false, true, entries)?;

    uow.insert_transaction(&transaction, cancel).await?;
    let tasks = ledger_transfer::generate(&transaction, &loaded_buckets, Utc::now())?;
    uow.insert_transfer_tasks(&tasks, cancel).await?;
    uow.commit(cancel).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        amount = %amount,
        source_bucket_id = %source_bucket_id,
        physical_destination_id = %physical_destination_id,
        "recorded external inflow"
    );
    Ok(transaction)
}

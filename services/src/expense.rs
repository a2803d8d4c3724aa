use std::collections::HashMap;

use chrono::Utc;
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::{Bucket, BucketType, Entry, EntryDirection, Layer, Transaction};
use ledger_repository::{LedgerStore, PostingUnitOfWork};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The result of [`log_expense`]: the posted transaction plus the physical
/// bucket actually debited, surfaced for UI feedback.
pub struct ExpenseResult {
    pub transaction: Transaction,
    pub physical_bucket_id: Uuid,
}

/// Logs an expense against a virtual envelope and an EXPENSE category,
/// optionally overriding which physical account actually paid for it. The
/// virtual layer always reflects the planned envelope; the override only
/// changes where the physical layer pulls from, which is exactly the
/// scenario the transfer-task generator reconciles afterward.
pub async fn log_expense<S: LedgerStore>(
    store: &S,
    amount: Money,
    description: impl Into<String>,
    virtual_bucket_id: Uuid,
    category_bucket_id: Uuid,
    physical_override_id: Option<Uuid>,
    cancel: &CancellationToken,
) -> LedgerResult<ExpenseResult> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount {
            amount: amount.to_string(),
        });
    }

    let mut uow = store.begin(cancel).await?;
    let virtual_bucket = uow
        .get_bucket(virtual_bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", virtual_bucket_id.to_string()))?;
    virtual_bucket.require_type(BucketType::Virtual, "VIRTUAL")?;

    let category = uow
        .get_bucket(category_bucket_id, cancel)
        .await?
        .ok_or_else(|| LedgerError::not_found("bucket", category_bucket_id.to_string()))?;
    category.require_type(BucketType::Expense, "EXPENSE")?;

    let physical_source = match physical_override_id {
        Some(override_id) => {
            let bucket = uow
                .get_bucket(override_id, cancel)
                .await?
                .ok_or_else(|| LedgerError::not_found("bucket", override_id.to_string()))?;
            bucket.require_type(BucketType::Physical, "PHYSICAL")?;
            bucket
        }
        None => {
            let parent_id = virtual_bucket.parent_bucket_id.ok_or_else(|| LedgerError::InvalidRule {
                source_bucket_id: virtual_bucket_id,
                reason: "virtual bucket has no parent physical bucket".into(),
            })?;
            uow.get_bucket(parent_id, cancel)
                .await?
                .ok_or_else(|| LedgerError::not_found("bucket", parent_id.to_string()))?
        }
    };

    let tx_id = Uuid::new_v4();
    let entries = vec![
        Entry::new(Uuid::new_v4(), tx_id, physical_source.id, amount, EntryDirection::Credit, Layer::Physical)?,
        Entry::new(Uuid::new_v4(), tx_id, category_bucket_id, amount, EntryDirection::Debit, Layer::Physical)?,
        Entry::new(Uuid::new_v4(), tx_id, virtual_bucket_id, amount, EntryDirection::Credit, Layer::Virtual)?,
        Entry::new(Uuid::new_v4(), tx_id, category_bucket_id, amount, EntryDirection::Debit, Layer::Virtual)?,
    ];
    let transaction = Transaction::new(tx_id, description, Utc::now(), false, false, entries)?;

    let mut loaded_buckets: HashMap<Uuid, Bucket> = HashMap::new();
    loaded_buckets.insert(physical_source.id, physical_source.clone());
    loaded_buckets.insert(category.id, category);
    loaded_buckets.insert(virtual_bucket.id, virtual_bucket);

    uow.insert_transaction(&transaction, cancel).await?;
    let tasks = ledger_transfer::generate(&transaction, &loaded_buckets, Utc::now())?;
    uow.insert_transfer_tasks(&tasks, cancel).await?;
    uow.commit(cancel).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        amount = %amount,
        category_bucket_id = %category_bucket_id,
        physical_bucket_id = %physical_source.id,
        transfer_tasks_emitted = tasks.len(),
        "logged expense"
    );

    Ok(ExpenseResult {
        transaction,
        physical_bucket_id: physical_source.id,
    })
}

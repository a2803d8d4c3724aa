use ledger_constants::SYSTEM_BUCKETS;
use ledger_decimal::Money;
use ledger_errors::LedgerResult;
use ledger_model::{Bucket, BucketType};
use ledger_repository::{LedgerStore, PostingUnitOfWork};
use tokio_util::sync::CancellationToken;

/// Ensures the three well-known SYSTEM buckets exist with their reserved
/// identifiers. Idempotent: running it any number of times (n ≥ 1) leaves
/// the store in the same state as running it once.
pub async fn seed_system_buckets<S: LedgerStore>(store: &S, cancel: &CancellationToken) -> LedgerResult<()> {
    for (id, name) in SYSTEM_BUCKETS {
        let mut unit_of_work = store.begin(cancel).await?;
        let bucket = Bucket {
            id,
            name: name.to_string(),
            bucket_type: BucketType::System,
            parent_bucket_id: None,
            current_balance: Money::ZERO,
        };
        let created = unit_of_work.seed_bucket_if_absent(&bucket, cancel).await?;
        unit_of_work.commit(cancel).await?;
        if created {
            tracing::info!(bucket_id = %id, bucket_name = name, "seeded system bucket");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_inmem_store::InMemoryLedgerStore;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = InMemoryLedgerStore::new();
        let cancel = CancellationToken::new();

        seed_system_buckets(&store, &cancel).await.unwrap();
        let after_first = store.list_buckets(Some(BucketType::System), &cancel).await.unwrap();
        assert_eq!(after_first.len(), SYSTEM_BUCKETS.len());

        seed_system_buckets(&store, &cancel).await.unwrap();
        seed_system_buckets(&store, &cancel).await.unwrap();
        let after_repeats = store.list_buckets(Some(BucketType::System), &cancel).await.unwrap();
        assert_eq!(after_repeats.len(), SYSTEM_BUCKETS.len());

        for (id, _) in SYSTEM_BUCKETS {
            assert!(after_repeats.iter().any(|b| b.id == id));
        }
    }
}

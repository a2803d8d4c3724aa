use ledger_constants::{SYSTEM_BUCKETS, SYSTEM_BUCKET_EXTRA_INCOME_ID, SYSTEM_BUCKET_LOST_AND_FOUND_ID, SYSTEM_BUCKET_VIRTUAL_CLEARING_ID};
use ledger_core::seed_system_buckets;
use ledger_inmem_store::InMemoryLedgerStore;
use ledger_model::BucketType;
use ledger_repository::LedgerStore;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn seeded_buckets_carry_their_reserved_identifiers_and_start_at_zero() {
    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();

    seed_system_buckets(&store, &cancel).await.unwrap();

    let virtual_clearing = store.get_bucket(SYSTEM_BUCKET_VIRTUAL_CLEARING_ID, &cancel).await.unwrap().unwrap();
    assert_eq!(virtual_clearing.bucket_type, BucketType::System);
    assert!(virtual_clearing.current_balance.is_zero());

    let lost_and_found = store.get_bucket(SYSTEM_BUCKET_LOST_AND_FOUND_ID, &cancel).await.unwrap().unwrap();
    assert_eq!(lost_and_found.bucket_type, BucketType::System);

    let extra_income = store.get_bucket(SYSTEM_BUCKET_EXTRA_INCOME_ID, &cancel).await.unwrap().unwrap();
    assert_eq!(extra_income.bucket_type, BucketType::System);

    let system_buckets = store.list_buckets(Some(BucketType::System), &cancel).await.unwrap();
    assert_eq!(system_buckets.len(), SYSTEM_BUCKETS.len());
}

#[tokio::test]
async fn reseeding_does_not_reset_a_bucket_that_already_moved_money() {
    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();

    seed_system_buckets(&store, &cancel).await.unwrap();

    let mut bucket = store.get_bucket(SYSTEM_BUCKET_LOST_AND_FOUND_ID, &cancel).await.unwrap().unwrap();
    bucket.current_balance = ledger_decimal::Money::from_i64(5);
    // Simulates a posting having moved money through the bucket between two
    // seeder runs; re-seeding must not reset it back to zero.
    store.insert_bucket_for_test(bucket).await;

    seed_system_buckets(&store, &cancel).await.unwrap();

    let after = store.get_bucket(SYSTEM_BUCKET_LOST_AND_FOUND_ID, &cancel).await.unwrap().unwrap();
    assert_eq!(after.current_balance, ledger_decimal::Money::from_i64(5));
}

use ledger_decimal::Money;
use ledger_errors::LedgerError;
use ledger_inmem_store::InMemoryLedgerStore;
use ledger_model::{Bucket, BucketType, SplitRule, SplitRuleItem};
use ledger_services::{calculate_profit, get_net_worth, log_expense, record_inflow, update_market_value};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Salary with mixed rules: FIXED 500 -> Vault, PERCENT 30 -> FreeCash,
/// REMAINDER -> Emergency, over an amount of 2000.
#[tokio::test]
async fn salary_with_mixed_rules_allocates_and_updates_balances() {
    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();

    let checking = Bucket::new(Uuid::new_v4(), "Checking", BucketType::Physical, None).unwrap();
    let salary = Bucket::new(Uuid::new_v4(), "Salary", BucketType::Income, None).unwrap();
    let vault = Bucket::new(Uuid::new_v4(), "Vault", BucketType::Virtual, Some(checking.id)).unwrap();
    let free_cash = Bucket::new(Uuid::new_v4(), "FreeCash", BucketType::Virtual, Some(checking.id)).unwrap();
    let emergency = Bucket::new(Uuid::new_v4(), "Emergency", BucketType::Virtual, Some(checking.id)).unwrap();

    let rule = SplitRule::new(
        Uuid::new_v4(),
        salary.id,
        vec![
            SplitRuleItem::fixed(Uuid::new_v4(), vault.id, Money::from_i64(500), 1).unwrap(),
            SplitRuleItem::percent(Uuid::new_v4(), free_cash.id, Decimal::from(30), 2).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), emergency.id, 3),
        ],
    )
    .unwrap();

    for bucket in [checking.clone(), salary.clone(), vault.clone(), free_cash.clone(), emergency.clone()] {
        store.insert_bucket_for_test(bucket).await;
    }
    store.insert_split_rule_for_test(rule).await;

    record_inflow(&store, Money::from_i64(2000), "salary", salary.id, true, &cancel).await.unwrap();

    let checking_after = store.get_bucket(checking.id, &cancel).await.unwrap().unwrap();
    let vault_after = store.get_bucket(vault.id, &cancel).await.unwrap().unwrap();
    let free_cash_after = store.get_bucket(free_cash.id, &cancel).await.unwrap().unwrap();
    let emergency_after = store.get_bucket(emergency.id, &cancel).await.unwrap().unwrap();

    assert_eq!(checking_after.current_balance, Money::from_i64(2000));
    assert_eq!(vault_after.current_balance, Money::from_i64(500));
    assert_eq!(free_cash_after.current_balance, Money::from_i64(450));
    assert_eq!(emergency_after.current_balance, Money::from_i64(1050));

    let net_worth = get_net_worth(&store, &cancel).await.unwrap();
    assert_eq!(net_worth.liquidity, Money::from_i64(2000));
    assert_eq!(net_worth.total, net_worth.liquidity + net_worth.equity);
}

/// A full salary-then-spend flow, exercising inflow, expense (including the
/// wrong-card path), and investment services against one shared store.
#[tokio::test]
async fn salary_then_expense_then_investment_end_to_end() {
    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();

    let checking = Bucket::new(Uuid::new_v4(), "Checking", BucketType::Physical, None).unwrap();
    let credit_card = Bucket::new(Uuid::new_v4(), "Credit Card", BucketType::Physical, None).unwrap();
    let salary = Bucket::new(Uuid::new_v4(), "Salary", BucketType::Income, None).unwrap();
    let free_cash = Bucket::new(Uuid::new_v4(), "FreeCash", BucketType::Virtual, Some(checking.id)).unwrap();
    let groceries = Bucket::new(Uuid::new_v4(), "Groceries", BucketType::Expense, None).unwrap();
    let tesla = Bucket::new(Uuid::new_v4(), "Tesla", BucketType::Equity, None).unwrap();

    let rule = SplitRule::new(Uuid::new_v4(), salary.id, vec![SplitRuleItem::remainder(Uuid::new_v4(), free_cash.id, 1)]).unwrap();

    for bucket in [checking.clone(), credit_card.clone(), salary.clone(), free_cash.clone(), groceries.clone(), tesla.clone()] {
        store.insert_bucket_for_test(bucket).await;
    }
    store.insert_split_rule_for_test(rule).await;

    record_inflow(&store, Money::from_i64(3000), "salary", salary.id, true, &cancel).await.unwrap();

    log_expense(&store, Money::from_i64(120), "groceries on card", free_cash.id, groceries.id, Some(credit_card.id), &cancel)
        .await
        .unwrap();

    let tasks = store.list_transfer_tasks(None, &cancel).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].from_physical_bucket_id, credit_card.id);
    assert_eq!(tasks[0].to_physical_bucket_id, checking.id);

    update_market_value(&store, tesla.id, Money::from_i64(800), &cancel).await.unwrap();
    let profit = calculate_profit(&store, tesla.id, &cancel).await.unwrap();
    assert_eq!(profit, Money::from_i64(800));

    let net_worth = get_net_worth(&store, &cancel).await.unwrap();
    assert_eq!(net_worth.liquidity, Money::from_i64(3000) - Money::from_i64(120));
    assert_eq!(net_worth.equity, Money::from_i64(800));
}

/// Scenario 6: rejected postings across the three posting services.
#[tokio::test]
async fn rejected_postings_surface_the_right_error_category() {
    let store = InMemoryLedgerStore::new();
    let cancel = CancellationToken::new();

    let salary = Bucket::new(Uuid::new_v4(), "Salary", BucketType::Income, None).unwrap();
    store.insert_bucket_for_test(salary.clone()).await;

    let err = record_inflow(&store, Money::from_i64(-100), "bad", salary.id, true, &cancel).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount { .. }));

    let err = log_expense(&store, Money::from_i64(50), "bad", Uuid::new_v4(), Uuid::new_v4(), None, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
}

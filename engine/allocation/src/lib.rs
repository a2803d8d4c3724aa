//! The split-rule allocation engine: a pure function from `(total, ordered
//! rule items)` to per-target allocations. No I/O, no repository access.

use std::collections::HashMap;

use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::{SplitItemKind, SplitRule};
use uuid::Uuid;

/// Distributes `total` across `rule`'s items and returns a map from target
/// bucket to allocated amount.
///
/// Preconditions: `total > 0`. Rule validates (at least one item, exactly
/// one REMAINDER, checked by [`SplitRule::validate`]).
///
/// Algorithm:
/// 1. Items considered in ascending priority order, ties broken by
///    original position (stable).
/// 2. FIXED items deducted from `remaining` in that order. A FIXED value
///    exceeding what's left fails with `AllocationOverflow`.
/// 3. PERCENT items each computed against the snapshot of `remaining`
///    taken after the FIXED pass. Independent of one another, not
///    sequentially deducted.
/// 4. REMAINDER item receives whatever is left of `total`. A negative
///    remainder fails with `AllocationOverflow`.
/// 5. Sum of every assigned amount checked against `total` exactly. A
///    mismatch fails with `AllocationImbalance` (should be unreachable,
///    guards arithmetic bugs rather than user input).
///
/// Two items naming the same target bucket are not aggregated. The later
/// one overwrites the earlier entry in the returned map. Rule authors are
/// responsible for keeping targets distinct.
pub fn allocate(total: Money, rule: &SplitRule) -> LedgerResult<HashMap<Uuid, Money>> {
    if !total.is_positive() {
        return Err(LedgerError::InvalidAmount {
            amount: total.to_string(),
        });
    }
    rule.validate()?;

    let ordered = rule.items_by_priority();
    let mut remaining = total;
    let mut assigned: HashMap<Uuid, Money> = HashMap::new();

    for item in ordered.iter().filter(|item| item.kind == SplitItemKind::Fixed) {
        let value = Money::new(item.value);
        if value.inner() > remaining.inner() {
            return Err(LedgerError::AllocationOverflow {
                total: total.to_string(),
                target_bucket_id: item.target_bucket_id,
            });
        }
        remaining = remaining - value;
        assigned.insert(item.target_bucket_id, value);
    }

    let base_for_percent = remaining;
    for item in ordered.iter().filter(|item| item.kind == SplitItemKind::Percent) {
        let value = base_for_percent.percent_of(item.value);
        assigned.insert(item.target_bucket_id, value);
    }

    let remainder_item = ordered
        .iter()
        .find(|item| item.kind == SplitItemKind::Remainder)
        .expect("SplitRule::validate guarantees exactly one REMAINDER item");

    let assigned_so_far: Money = assigned.values().copied().sum();
    let remainder_amount = total - assigned_so_far;
    if remainder_amount.is_negative() {
        return Err(LedgerError::AllocationOverflow {
            total: total.to_string(),
            target_bucket_id: remainder_item.target_bucket_id,
        });
    }
    assigned.insert(remainder_item.target_bucket_id, remainder_amount);

    let final_sum: Money = assigned.values().copied().sum();
    if final_sum != total {
        return Err(LedgerError::AllocationImbalance {
            total: total.to_string(),
            assigned: final_sum.to_string(),
        });
    }

    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_model::SplitRuleItem;
    use rust_decimal::Decimal;

    fn rule(items: Vec<SplitRuleItem>) -> SplitRule {
        SplitRule::new(Uuid::new_v4(), Uuid::new_v4(), items).unwrap()
    }

    #[test]
    fn coffee_missions_catch_all_split() {
        let coffee = Uuid::new_v4();
        let missions = Uuid::new_v4();
        let catch_all = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::fixed(Uuid::new_v4(), coffee, Money::from_i64(50), 1).unwrap(),
            SplitRuleItem::percent(Uuid::new_v4(), missions, Decimal::from(10), 2).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), catch_all, 3),
        ]);

        let result = allocate(Money::from_i64(1000), &rule).unwrap();
        assert_eq!(result[&coffee], Money::from_i64(50));
        assert_eq!(result[&missions], Money::from_i64(95));
        assert_eq!(result[&catch_all], Money::from_i64(855));
        let total: Money = result.values().copied().sum();
        assert_eq!(total, Money::from_i64(1000));
    }

    #[test]
    fn salary_with_mixed_rules() {
        let vault = Uuid::new_v4();
        let free_cash = Uuid::new_v4();
        let emergency = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::fixed(Uuid::new_v4(), vault, Money::from_i64(500), 1).unwrap(),
            SplitRuleItem::percent(Uuid::new_v4(), free_cash, Decimal::from(30), 2).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), emergency, 3),
        ]);

        let result = allocate(Money::from_i64(2000), &rule).unwrap();
        assert_eq!(result[&vault], Money::from_i64(500));
        assert_eq!(result[&free_cash], Money::from_i64(450));
        assert_eq!(result[&emergency], Money::from_i64(1050));
    }

    #[test]
    fn fixed_exceeding_total_overflows() {
        let target = Uuid::new_v4();
        let remainder_target = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::fixed(Uuid::new_v4(), target, Money::from_i64(2000), 1).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), remainder_target, 2),
        ]);

        let err = allocate(Money::from_i64(1000), &rule).unwrap_err();
        assert!(matches!(err, LedgerError::AllocationOverflow { .. }));
    }

    #[test]
    fn percents_are_independent_of_each_other() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let remainder_target = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::percent(Uuid::new_v4(), a, Decimal::from(40), 1).unwrap(),
            SplitRuleItem::percent(Uuid::new_v4(), b, Decimal::from(40), 2).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), remainder_target, 3),
        ]);

        // Both PERCENT items computed against the same 1000 base, not
        // sequentially deducted. 40% + 40% leaves 20% (200) for the
        // remainder, not 1000 - 400 - 400*0.6.
        let result = allocate(Money::from_i64(1000), &rule).unwrap();
        assert_eq!(result[&a], Money::from_i64(400));
        assert_eq!(result[&b], Money::from_i64(400));
        assert_eq!(result[&remainder_target], Money::from_i64(200));
    }

    #[test]
    fn zero_remainder_is_allowed() {
        let target = Uuid::new_v4();
        let remainder_target = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::fixed(Uuid::new_v4(), target, Money::from_i64(1000), 1).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), remainder_target, 2),
        ]);

        let result = allocate(Money::from_i64(1000), &rule).unwrap();
        assert_eq!(result[&remainder_target], Money::ZERO);
    }

    #[test]
    fn same_inputs_yield_identical_outputs() {
        let target = Uuid::new_v4();
        let remainder_target = Uuid::new_v4();
        let rule = rule(vec![
            SplitRuleItem::fixed(Uuid::new_v4(), target, Money::from_i64(50), 1).unwrap(),
            SplitRuleItem::remainder(Uuid::new_v4(), remainder_target, 2),
        ]);

        let first = allocate(Money::from_i64(1000), &rule).unwrap();
        let second = allocate(Money::from_i64(1000), &rule).unwrap();
        assert_eq!(first[&target], second[&target]);
        assert_eq!(first[&remainder_target], second[&remainder_target]);
    }

    #[test]
    fn non_positive_total_is_rejected() {
        let remainder_target = Uuid::new_v4();
        let rule = rule(vec![SplitRuleItem::remainder(Uuid::new_v4(), remainder_target, 1)]);
        let err = allocate(Money::ZERO, &rule).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
    }
}

use ledger_model::{Bucket, Entry, EntryDirection};

/// Applies one posted entry to its bucket's running balance: `+amount` for
/// DEBIT, `-amount` for CREDIT. A storage implementation calls this for
/// every entry it inserts, inside the same transactional unit as the
/// insert, so that `bucket.current_balance` always equals the sum of
/// DEBIT amounts minus the sum of CREDIT amounts for posted entries.
pub fn apply_entry(bucket: &mut Bucket, entry: &Entry) {
    debug_assert_eq!(bucket.id, entry.bucket_id);
    match entry.direction {
        EntryDirection::Debit => bucket.current_balance += entry.amount,
        EntryDirection::Credit => bucket.current_balance -= entry.amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_decimal::Money;
    use ledger_model::{BucketType, Layer};
    use uuid::Uuid;

    fn bucket() -> Bucket {
        Bucket::new(Uuid::new_v4(), "Checking", BucketType::Physical, None).unwrap()
    }

    #[test]
    fn debit_increases_balance() {
        let mut b = bucket();
        let entry = Entry::new(Uuid::new_v4(), Uuid::new_v4(), b.id, Money::from_i64(100), EntryDirection::Debit, Layer::Physical).unwrap();
        apply_entry(&mut b, &entry);
        assert_eq!(b.current_balance, Money::from_i64(100));
    }

    #[test]
    fn credit_decreases_balance() {
        let mut b = bucket();
        b.current_balance = Money::from_i64(100);
        let entry = Entry::new(Uuid::new_v4(), Uuid::new_v4(), b.id, Money::from_i64(40), EntryDirection::Credit, Layer::Physical).unwrap();
        apply_entry(&mut b, &entry);
        assert_eq!(b.current_balance, Money::from_i64(60));
    }

    #[test]
    fn reconstructed_balance_matches_running_total_across_many_entries() {
        let mut b = bucket();
        let postings = [(EntryDirection::Debit, 300), (EntryDirection::Credit, 50), (EntryDirection::Debit, 10)];
        for (direction, amount) in postings {
            let entry = Entry::new(Uuid::new_v4(), Uuid::new_v4(), b.id, Money::from_i64(amount), direction, Layer::Physical).unwrap();
            apply_entry(&mut b, &entry);
        }
        assert_eq!(b.current_balance, Money::from_i64(260));
    }
}

//! The transfer-task generator. Compares, per physical anchor, what a
//! transaction's PHYSICAL-layer entries say actually happened against what
//! its VIRTUAL-layer entries imply should have happened, and emits the
//! pending real-world transfers needed to reconcile any mismatch. Pure
//! function over already-loaded buckets, no storage dependency of its own.
//!
//! A virtual bucket's anchor is its parent physical bucket. When a
//! posting's physical side actually moves money through that same parent
//! (the common case), actual and implied flows cancel and no task is
//! produced. When a posting overrides the physical side to a different
//! account (e.g. an expense paid by a different card than the envelope
//! it's budgeted against), the two sides diverge per anchor and a task
//! drains the difference.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ledger_decimal::Money;
use ledger_errors::{LedgerError, LedgerResult};
use ledger_model::{Bucket, BucketType, Entry, EntryDirection, Layer, Transaction, TransferTask};
use uuid::Uuid;

fn signed_flow(entry: &Entry) -> Money {
    match entry.direction {
        EntryDirection::Debit => entry.amount,
        EntryDirection::Credit => Money::ZERO - entry.amount,
    }
}

fn lookup<'a>(buckets: &'a HashMap<Uuid, Bucket>, id: Uuid) -> LedgerResult<&'a Bucket> {
    buckets.get(&id).ok_or_else(|| LedgerError::not_found("bucket", id.to_string()))
}

/// Generates the transfer tasks implied by `transaction`. `buckets` must
/// contain every bucket referenced by its entries, keyed by id; a missing
/// reference fails with `NotFound` rather than silently skipping the flow.
pub fn generate(transaction: &Transaction, buckets: &HashMap<Uuid, Bucket>, now: DateTime<Utc>) -> LedgerResult<Vec<TransferTask>> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut net_flow: HashMap<Uuid, Money> = HashMap::new();
    let mut bump = |anchor: Uuid, delta: Money, order: &mut Vec<Uuid>, net_flow: &mut HashMap<Uuid, Money>| {
        if !net_flow.contains_key(&anchor) {
            order.push(anchor);
        }
        *net_flow.entry(anchor).or_insert(Money::ZERO) += delta;
    };

    for entry in transaction.entries_in_layer(Layer::Physical) {
        let bucket = lookup(buckets, entry.bucket_id)?;
        if bucket.bucket_type == BucketType::Physical {
            bump(bucket.id, signed_flow(entry), &mut order, &mut net_flow);
        }
    }
    for entry in transaction.entries_in_layer(Layer::Virtual) {
        let bucket = lookup(buckets, entry.bucket_id)?;
        if bucket.bucket_type == BucketType::Virtual {
            if let Some(parent) = bucket.parent_bucket_id {
                bump(parent, Money::ZERO - signed_flow(entry), &mut order, &mut net_flow);
            }
        }
    }

    let mut senders: Vec<(Uuid, Money)> = Vec::new();
    let mut receivers: Vec<(Uuid, Money)> = Vec::new();
    for anchor in order {
        let flow = net_flow[&anchor];
        if flow.is_negative() {
            senders.push((anchor, flow.abs()));
        } else if flow.is_positive() {
            receivers.push((anchor, flow));
        }
    }

    let mut tasks = Vec::new();
    for sender in senders.iter_mut() {
        if sender.1.is_zero() {
            continue;
        }
        for receiver in receivers.iter_mut() {
            if sender.1.is_zero() {
                break;
            }
            if receiver.1.is_zero() {
                continue;
            }
            let amount = sender.1.min(receiver.1);
            tasks.push(TransferTask::new(Uuid::new_v4(), transaction.id, sender.0, receiver.0, amount, now));
            sender.1 -= amount;
            receiver.1 -= amount;
        }
    }

    Ok(tasks)
}

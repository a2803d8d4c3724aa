//! Domain model for the envelope ledger: buckets, transactions and entries,
//! split rules, market-value points, and transfer tasks. Every type here
//! self-validates. Invariants are checked on construction or via an
//! explicit `validate()`, never assumed by a caller.

mod bucket;
mod market_value;
mod split_rule;
mod transaction;
mod transfer_task;

pub use bucket::{Bucket, BucketType};
pub use market_value::{latest, MarketValuePoint};
pub use split_rule::{SplitItemKind, SplitRule, SplitRuleItem};
pub use transaction::{Entry, EntryDirection, Layer, Transaction};
pub use transfer_task::TransferTask;

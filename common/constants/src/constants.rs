//! Reserved identifiers and fixed parameters shared across the ledger crates.

use uuid::{uuid, Uuid};

/// Virtual-layer clearing account. Used when the allocation engine's
/// bookkeeping needs a neutral counterpart bucket that is not a user-facing
/// envelope.
pub const SYSTEM_BUCKET_VIRTUAL_CLEARING_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000001");
pub const SYSTEM_BUCKET_VIRTUAL_CLEARING_NAME: &str = "Virtual Clearing";

/// Catches lost or unreconciled cents so every posting still balances.
pub const SYSTEM_BUCKET_LOST_AND_FOUND_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000002");
pub const SYSTEM_BUCKET_LOST_AND_FOUND_NAME: &str = "Lost & Found";

/// Receives income that arrives with no matching split rule target.
pub const SYSTEM_BUCKET_EXTRA_INCOME_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000003");
pub const SYSTEM_BUCKET_EXTRA_INCOME_NAME: &str = "Extra Income";

/// All three reserved system buckets, in seeding order.
pub const SYSTEM_BUCKETS: [(Uuid, &str); 3] = [
    (SYSTEM_BUCKET_VIRTUAL_CLEARING_ID, SYSTEM_BUCKET_VIRTUAL_CLEARING_NAME),
    (SYSTEM_BUCKET_LOST_AND_FOUND_ID, SYSTEM_BUCKET_LOST_AND_FOUND_NAME),
    (SYSTEM_BUCKET_EXTRA_INCOME_ID, SYSTEM_BUCKET_EXTRA_INCOME_NAME),
];

/// Default number of decimal places money is rounded and displayed at.
pub const DECIMAL_SCALE: u32 = 2;

/// Minimum allowed percent-split value (inclusive).
pub const PERCENT_MIN: i64 = 0;
/// Maximum allowed percent-split value (inclusive).
pub const PERCENT_MAX: i64 = 100;

/// Default page size applied when a caller does not constrain `listTransactions`.
pub const DEFAULT_TRANSACTION_PAGE_SIZE: u32 = 50;

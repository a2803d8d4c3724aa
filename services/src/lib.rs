//! Posting services: the effectful shell around the pure allocation,
//! balance, and transfer-task engines. Every operation here depends only on
//! the [`ledger_repository`] traits, never on a concrete store, so the
//! persistence choice and the RPC boundary that will eventually front these
//! services stay external collaborators.

pub mod dashboard;
pub mod expense;
pub mod inflow;
pub mod investment;

pub use dashboard::{get_bucket, get_net_worth, list_buckets, list_transactions, NetWorth, TransactionPage};
pub use expense::{log_expense, ExpenseResult};
pub use inflow::record_inflow;
pub use investment::{calculate_profit, update_market_value};

//! The balance-maintenance rule and the system seeder: the two pieces of
//! invariant-bearing logic that live at the boundary between the domain
//! model and a concrete storage engine. Storage implementations call into
//! this crate rather than re-deriving either rule.

mod balance;
mod seeder;

pub use balance::apply_entry;
pub use seeder::seed_system_buckets;

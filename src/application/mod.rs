//! Application layer containing the wallet operations and the core engines.
//!
//! `Wallet` is the primary entry point. Aggregations fan out over scoped
//! worker threads (`aggregate`, `partition`); persistence goes through the
//! codecs in `interfaces::codec` and lands in the ledger via `merge`.

pub mod aggregate;
pub mod merge;
pub mod partition;
pub mod wallet;

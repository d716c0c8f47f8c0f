//! Adapters between the ledger and the outside world.

pub mod codec;

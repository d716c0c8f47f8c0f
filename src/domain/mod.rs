//! Ledger records and the ports the application layer consumes.

pub mod account;
pub mod favorite;
pub mod payment;
pub mod ports;

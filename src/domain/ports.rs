use super::account::Account;
use super::payment::Payment;
use crate::error::Result;

/// Read access to the ordered payment sequence.
///
/// Implementations must not mutate the sequence while a borrow is alive,
/// which the shared borrow enforces for in-process stores.
pub trait PaymentSource {
    fn payments(&self) -> &[Payment];
}

impl PaymentSource for [Payment] {
    fn payments(&self) -> &[Payment] {
        self
    }
}

impl PaymentSource for Vec<Payment> {
    fn payments(&self) -> &[Payment] {
        self
    }
}

pub trait AccountLookup {
    /// Returns the account or `WalletError::AccountNotFound`.
    fn find_account(&self, account_id: i64) -> Result<&Account>;
}

use crate::domain::account::Account;
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::domain::ports::{AccountLookup, PaymentSource};
use crate::error::{Result, WalletError};

/// Whether an upsert overwrote an existing record or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Updated,
    Appended,
}

/// An in-memory store for accounts, payments and favorites.
///
/// Records are kept as ordered sequences; lookups are linear scans by
/// primary key. Ideal for a single-process, single-snapshot ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    next_account_id: i64,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next sequential account id.
    pub fn allocate_account_id(&mut self) -> i64 {
        self.next_account_id += 1;
        self.next_account_id
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn push_account(&mut self, account: Account) {
        self.next_account_id = self.next_account_id.max(account.id);
        self.accounts.push(account);
    }

    pub fn push_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    pub fn push_favorite(&mut self, favorite: Favorite) {
        self.favorites.push(favorite);
    }

    pub fn account_by_phone(&self, phone: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.phone == phone)
    }

    pub fn account_mut(&mut self, account_id: i64) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(WalletError::AccountNotFound)
    }

    pub fn payment(&self, payment_id: &str) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|p| p.id == payment_id)
            .ok_or(WalletError::PaymentNotFound)
    }

    pub fn payment_mut(&mut self, payment_id: &str) -> Result<&mut Payment> {
        self.payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or(WalletError::PaymentNotFound)
    }

    pub fn favorite(&self, favorite_id: &str) -> Result<&Favorite> {
        self.favorites
            .iter()
            .find(|f| f.id == favorite_id)
            .ok_or(WalletError::FavoriteNotFound)
    }

    /// Overwrites the account with the same id, or appends it.
    pub fn upsert_account(&mut self, account: Account) -> Upsert {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => {
                existing.phone = account.phone;
                existing.balance = account.balance;
                Upsert::Updated
            }
            None => {
                self.push_account(account);
                Upsert::Appended
            }
        }
    }

    /// Overwrites the payment with the same id, or appends it.
    pub fn upsert_payment(&mut self, payment: Payment) -> Upsert {
        match self.payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => {
                existing.account_id = payment.account_id;
                existing.amount = payment.amount;
                existing.category = payment.category;
                existing.status = payment.status;
                Upsert::Updated
            }
            None => {
                self.payments.push(payment);
                Upsert::Appended
            }
        }
    }

    /// Overwrites the favorite with the same id, or appends it.
    pub fn upsert_favorite(&mut self, favorite: Favorite) -> Upsert {
        match self.favorites.iter_mut().find(|f| f.id == favorite.id) {
            Some(existing) => {
                existing.account_id = favorite.account_id;
                existing.name = favorite.name;
                existing.amount = favorite.amount;
                existing.category = favorite.category;
                Upsert::Updated
            }
            None => {
                self.favorites.push(favorite);
                Upsert::Appended
            }
        }
    }
}

impl PaymentSource for InMemoryLedger {
    fn payments(&self) -> &[Payment] {
        &self.payments
    }
}

impl AccountLookup for InMemoryLedger {
    fn find_account(&self, account_id: i64) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or(WalletError::AccountNotFound)
    }
}

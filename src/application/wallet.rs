use crate::application::aggregate::{self, Progress};
use crate::application::merge::{self, ImportSummary, MergeCounts};
use crate::domain::account::{Account, Money};
use crate::domain::favorite::Favorite;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{AccountLookup, PaymentSource};
use crate::error::{Result, WalletError};
use crate::infrastructure::in_memory::InMemoryLedger;
use crate::interfaces::codec::{check_field, compact, dump};
use std::path::Path;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// The main entry point for wallet operations.
///
/// `Wallet` owns the ledger and is the only writer to it. Aggregations borrow
/// the payment sequence immutably, so no mutation can interleave with them.
#[derive(Debug, Default)]
pub struct Wallet {
    ledger: InMemoryLedger,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing ledger.
    pub fn with_ledger(ledger: InMemoryLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    /// Registers a new account with a zero balance.
    pub fn register_account(&mut self, phone: &str) -> Result<Account> {
        check_field(phone)?;
        if self.ledger.account_by_phone(phone).is_some() {
            return Err(WalletError::PhoneAlreadyRegistered);
        }

        let account = Account::new(self.ledger.allocate_account_id(), phone);
        self.ledger.push_account(account.clone());
        debug!(account = account.id, "account registered");
        Ok(account)
    }

    pub fn deposit(&mut self, account_id: i64, amount: Money) -> Result<()> {
        let amount = amount.positive()?;
        self.ledger.account_mut(account_id)?.deposit(amount)
    }

    /// Debits the account and records an in-progress payment.
    pub fn pay(&mut self, account_id: i64, amount: Money, category: &str) -> Result<Payment> {
        let amount = amount.positive()?;
        check_field(category)?;
        self.ledger.account_mut(account_id)?.withdraw(amount)?;

        let payment = Payment::new(Uuid::new_v4().to_string(), account_id, amount, category);
        self.ledger.push_payment(payment.clone());
        debug!(payment = %payment.id, account = account_id, %amount, "payment created");
        Ok(payment)
    }

    pub fn find_account_by_id(&self, account_id: i64) -> Result<&Account> {
        self.ledger.find_account(account_id)
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment> {
        self.ledger.payment(payment_id)
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite> {
        self.ledger.favorite(favorite_id)
    }

    /// Refunds the payment's amount and marks it failed.
    ///
    /// Nothing changes if the refund would overflow the balance.
    pub fn reject(&mut self, payment_id: &str) -> Result<()> {
        let payment = self.ledger.payment(payment_id)?;
        let (account_id, amount) = (payment.account_id, payment.amount);

        self.ledger.account_mut(account_id)?.deposit(amount)?;
        self.ledger.payment_mut(payment_id)?.status = PaymentStatus::Fail;
        Ok(())
    }

    /// Pays again with the account, amount and category of `payment_id`.
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment> {
        let payment = self.ledger.payment(payment_id)?.clone();
        self.pay(payment.account_id, payment.amount, &payment.category)
    }

    pub fn favorite_payment(&mut self, payment_id: &str, name: &str) -> Result<Favorite> {
        check_field(name)?;
        let payment = self.ledger.payment(payment_id)?;
        let favorite = Favorite::from_payment(Uuid::new_v4().to_string(), name, payment);
        self.ledger.push_favorite(favorite.clone());
        Ok(favorite)
    }

    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment> {
        let favorite = self.ledger.favorite(favorite_id)?.clone();
        self.pay(favorite.account_id, favorite.amount, &favorite.category)
    }

    /// Every payment of `account_id`, in ledger order.
    ///
    /// Fails with `AccountNotFound` if the account is unknown or has no
    /// payments.
    pub fn export_account_history(&self, account_id: i64) -> Result<Vec<Payment>> {
        self.ledger.find_account(account_id)?;

        let payments: Vec<Payment> = self
            .ledger
            .payments()
            .iter()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect();
        if payments.is_empty() {
            return Err(WalletError::AccountNotFound);
        }
        Ok(payments)
    }

    /// Backs up `payments` into `dir` in files of at most `records` lines.
    pub fn history_to_files(&self, payments: &[Payment], dir: &Path, records: usize) -> Result<()> {
        dump::write_payment_history(dir, payments, records)
    }

    pub fn sum_payments(&self, workers: usize) -> Result<Money> {
        aggregate::sum_payments(&self.ledger, workers)
    }

    pub fn filter_payments_by_fn<F>(&self, predicate: F, workers: usize) -> Result<Vec<Payment>>
    where
        F: Fn(&Payment) -> bool + Sync,
    {
        aggregate::filter_payments_by_fn(&self.ledger, predicate, workers)
    }

    pub fn filter_payments(&self, account_id: i64, workers: usize) -> Result<Vec<Payment>> {
        aggregate::filter_payments(&self.ledger, account_id, workers)
    }

    /// See [`aggregate::sum_payments_with_progress`].
    pub fn sum_payments_with_progress(
        &self,
        runtime: &Handle,
    ) -> mpsc::Receiver<Result<Progress>> {
        aggregate::sum_payments_with_progress(&self.ledger, runtime)
    }

    /// Writes all accounts to a single compact file.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        compact::write_file(path, self.ledger.accounts())?;
        info!(path = %path.display(), accounts = self.ledger.accounts().len(), "accounts exported");
        Ok(())
    }

    /// Merges the accounts of a compact file by id.
    ///
    /// The whole file is decoded first; nothing is applied if any record is
    /// malformed.
    pub fn import_from_file(&mut self, path: &Path) -> Result<MergeCounts> {
        let accounts = compact::read_file(path)?;
        let counts = merge::merge_accounts(&mut self.ledger, accounts);
        info!(path = %path.display(), ?counts, "accounts imported");
        Ok(counts)
    }

    /// Writes the accounts, payments and favorites dump files into `dir`.
    pub fn export(&self, dir: &Path) -> Result<()> {
        dump::write_dir(
            dir,
            self.ledger.accounts(),
            self.ledger.payments(),
            self.ledger.favorites(),
        )?;
        info!(dir = %dir.display(), "ledger exported");
        Ok(())
    }

    /// Merges the dump files found in `dir` into the ledger.
    pub fn import(&mut self, dir: &Path) -> Result<ImportSummary> {
        merge::import(&mut self.ledger, dir)
    }
}

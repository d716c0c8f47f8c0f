//! Applies dump files onto the live ledger.
//!
//! Each record is merged by primary key as soon as it is decoded: an existing
//! record has every mutable field overwritten, an unknown one is appended.
//! A malformed line stops the merge of its file, keeping the lines already
//! applied.

use crate::domain::account::Account;
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::error::{DecodeError, Result, WalletError};
use crate::infrastructure::in_memory::{InMemoryLedger, Upsert};
use crate::interfaces::codec::Record;
use crate::interfaces::codec::dump::{ACCOUNTS_FILE, FAVORITES_FILE, PAYMENTS_FILE, open_records};
use std::path::Path;
use tracing::{info, warn};

/// Per-file outcome of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeCounts {
    /// False when the dump file was absent.
    pub present: bool,
    pub updated: usize,
    pub appended: usize,
}

impl MergeCounts {
    fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Updated => self.updated += 1,
            Upsert::Appended => self.appended += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub accounts: MergeCounts,
    pub payments: MergeCounts,
    pub favorites: MergeCounts,
}

/// Merges `accounts.dump`, `payments.dump` and `favorites.dump` from `dir`.
///
/// Missing files are skipped. Every file is attempted even if an earlier one
/// fails to decode; the first decode failure is then returned. Any other I/O
/// error aborts immediately.
pub fn import(ledger: &mut InMemoryLedger, dir: &Path) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    let mut failures: Vec<DecodeError> = Vec::new();

    let outcome = merge_file::<Account>(dir, ACCOUNTS_FILE, &mut summary.accounts, |record| {
        ledger.upsert_account(record)
    });
    collect(outcome, &mut failures)?;

    let outcome = merge_file::<Payment>(dir, PAYMENTS_FILE, &mut summary.payments, |record| {
        ledger.upsert_payment(record)
    });
    collect(outcome, &mut failures)?;

    let outcome = merge_file::<Favorite>(dir, FAVORITES_FILE, &mut summary.favorites, |record| {
        ledger.upsert_favorite(record)
    });
    collect(outcome, &mut failures)?;

    info!(dir = %dir.display(), ?summary, failed = failures.len(), "import finished");
    match failures.into_iter().next() {
        Some(failure) => Err(failure.into()),
        None => Ok(summary),
    }
}

/// Merges already decoded accounts by id.
pub fn merge_accounts(ledger: &mut InMemoryLedger, accounts: Vec<Account>) -> MergeCounts {
    let mut counts = MergeCounts {
        present: true,
        ..MergeCounts::default()
    };
    for account in accounts {
        counts.record(ledger.upsert_account(account));
    }
    counts
}

fn merge_file<T: Record>(
    dir: &Path,
    name: &str,
    counts: &mut MergeCounts,
    mut apply: impl FnMut(T) -> Upsert,
) -> Result<()> {
    let path = dir.join(name);
    let Some(reader) = open_records(&path)? else {
        info!(path = %path.display(), "dump file absent, skipping");
        return Ok(());
    };

    counts.present = true;
    for record in reader.records::<T>() {
        counts.record(apply(record?));
    }
    Ok(())
}

fn collect(outcome: Result<()>, failures: &mut Vec<DecodeError>) -> Result<()> {
    match outcome {
        Err(WalletError::Decode(failure)) => {
            warn!(%failure, "dump file merge aborted");
            failures.push(failure);
            Ok(())
        }
        other => other,
    }
}

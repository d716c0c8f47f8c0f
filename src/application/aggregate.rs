//! Parallel aggregation over the payment sequence.
//!
//! Every operation splits the sequence with [`partition::shards`], runs one
//! scoped worker thread per shard, and merges partial results under a single
//! mutex. The lock is taken once per worker, after its shard scan.
//!
//! Sums are accumulated as `i128`, so only a total outside the `i64` range
//! fails, independently of how the sequence was split.

use crate::application::partition;
use crate::domain::account::Money;
use crate::domain::payment::Payment;
use crate::domain::ports::PaymentSource;
use crate::error::{Result, WalletError};
use std::sync::{Mutex, PoisonError};
use std::thread;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Worker count used when the caller does not pick one.
pub const DEFAULT_WORKERS: usize = 4;

/// A sum computed by [`sum_payments_with_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Always 0; reserved for an incremental emitter.
    pub part: usize,
    pub result: Money,
}

/// Sums every payment amount using `workers` threads.
///
/// The result does not depend on `workers`. Zero workers is treated as one.
/// Fails with `WalletError::AmountOverflow` if the total does not fit in
/// `Money`.
pub fn sum_payments<S: PaymentSource + ?Sized>(source: &S, workers: usize) -> Result<Money> {
    let payments = source.payments();
    let total = Mutex::new(0i128);

    thread::scope(|scope| {
        for (index, range) in partition::shards(payments.len(), workers).enumerate() {
            let shard = &payments[range];
            let total = &total;
            scope.spawn(move || {
                let partial: i128 = shard.iter().map(|p| i128::from(p.amount.value())).sum();
                debug!(worker = index, len = shard.len(), partial, "shard summed");
                *total.lock().unwrap_or_else(PoisonError::into_inner) += partial;
            });
        }
    });

    Money::from_wide(total.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Collects every payment matching `predicate` using `workers` threads.
///
/// The order of the returned payments is unspecified: shards are appended in
/// whatever order their workers finish. An empty result is reported as
/// `WalletError::AccountNotFound`.
pub fn filter_payments_by_fn<S, F>(
    source: &S,
    predicate: F,
    workers: usize,
) -> Result<Vec<Payment>>
where
    S: PaymentSource + ?Sized,
    F: Fn(&Payment) -> bool + Sync,
{
    let payments = source.payments();
    let matched = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for (index, range) in partition::shards(payments.len(), workers).enumerate() {
            let shard = &payments[range];
            let matched = &matched;
            let predicate = &predicate;
            scope.spawn(move || {
                let local: Vec<Payment> =
                    shard.iter().filter(|&p| predicate(p)).cloned().collect();
                debug!(
                    worker = index,
                    len = shard.len(),
                    matched = local.len(),
                    "shard filtered"
                );
                matched
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend(local);
            });
        }
    });

    let matched = matched.into_inner().unwrap_or_else(PoisonError::into_inner);
    if matched.is_empty() {
        return Err(WalletError::AccountNotFound);
    }
    Ok(matched)
}

/// Collects the payments of `account_id` using `workers` threads.
pub fn filter_payments<S: PaymentSource + ?Sized>(
    source: &S,
    account_id: i64,
    workers: usize,
) -> Result<Vec<Payment>> {
    filter_payments_by_fn(source, move |p| p.account_id == account_id, workers)
}

/// Sums the payments on a task spawned onto `runtime` and delivers the total
/// once.
///
/// The returned channel yields a single item and then closes; an overflowing
/// total is delivered as `Err(WalletError::AmountOverflow)`. For an empty
/// sequence it is closed immediately. Dropping the receiver never blocks the
/// producer. The caller does not need to be inside the runtime.
pub fn sum_payments_with_progress<S: PaymentSource + ?Sized>(
    source: &S,
    runtime: &Handle,
) -> mpsc::Receiver<Result<Progress>> {
    let (tx, rx) = mpsc::channel(1);
    let payments = source.payments();
    if payments.is_empty() {
        return rx;
    }

    let amounts: Vec<Money> = payments.iter().map(|p| p.amount).collect();
    runtime.spawn(async move {
        let progress = Money::checked_sum(amounts).map(|result| Progress { part: 0, result });
        if let Err(e) = &progress {
            warn!(%e, "payment total not representable");
        }
        if tx.send(progress).await.is_err() {
            debug!("progress receiver dropped before the sum was delivered");
        }
    });

    rx
}

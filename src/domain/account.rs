use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary value in minor currency units.
///
/// Wraps an `i64` so ledger arithmetic never touches floating point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the amount unchanged if it is strictly positive.
    pub fn positive(self) -> Result<Self, WalletError> {
        if self.0 > 0 {
            Ok(self)
        } else {
            Err(WalletError::AmountMustBePositive)
        }
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, WalletError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(WalletError::AmountOverflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, WalletError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(WalletError::AmountOverflow)
    }

    /// Sums `amounts` exactly; fails only if the total does not fit in `i64`.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Result<Self, WalletError> {
        Self::from_wide(amounts.into_iter().map(|m| i128::from(m.0)).sum())
    }

    /// Narrows a widened total back to `Money`.
    pub fn from_wide(total: i128) -> Result<Self, WalletError> {
        i64::try_from(total)
            .map(Self)
            .map_err(|_| WalletError::AmountOverflow)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered wallet holder.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    /// Sequential identifier, starting at 1.
    pub id: i64,
    /// Unique among accounts.
    pub phone: String,
    pub balance: Money,
}

impl Account {
    pub fn new(id: i64, phone: impl Into<String>) -> Self {
        Self {
            id,
            phone: phone.into(),
            balance: Money::ZERO,
        }
    }

    /// Credits the balance, leaving it unchanged on overflow.
    pub fn deposit(&mut self, amount: Money) -> Result<(), WalletError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Debits the balance if it covers `amount`.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), WalletError> {
        if self.balance < amount {
            return Err(WalletError::NotEnoughBalance);
        }
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }
}

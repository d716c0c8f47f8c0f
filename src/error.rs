use std::path::PathBuf;
use thiserror::Error;

/// A malformed record found while decoding a ledger file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}:{line}: {reason}", .path.display())]
pub struct DecodeError {
    /// The file being decoded.
    pub path: PathBuf,
    /// 1-based line in a dump file, or record number in a compact file.
    pub line: u64,
    pub reason: String,
}

impl DecodeError {
    pub fn new(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("phone already registered")]
    PhoneAlreadyRegistered,
    #[error("amount must be greater than zero")]
    AmountMustBePositive,
    #[error("amount out of range")]
    AmountOverflow,
    /// Text that would contain a field or record separator once encoded.
    #[error("field {0:?} contains a reserved separator")]
    InvalidField(String),
    /// Also returned when a filter or history query matches nothing.
    #[error("account not found")]
    AccountNotFound,
    #[error("not enough balance")]
    NotEnoughBalance,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("favorite not found")]
    FavoriteNotFound,
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WalletError>;

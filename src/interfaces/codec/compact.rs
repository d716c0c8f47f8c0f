//! Single-file account format: `id;phone;balance` records joined by `|`.

use super::{RecordReader, encode};
use crate::domain::account::Account;
use crate::error::Result;
use std::fs;
use std::path::Path;

pub const RECORD_SEPARATOR: u8 = b'|';

pub fn encode_accounts(accounts: &[Account]) -> Result<Vec<u8>> {
    encode(accounts, RECORD_SEPARATOR)
}

/// Decodes every account in `data`, failing on the first malformed record.
pub fn decode_accounts(path: &Path, data: &[u8]) -> Result<Vec<Account>> {
    RecordReader::new(path, data, RECORD_SEPARATOR)
        .records()
        .collect()
}

/// Writes all accounts to `path`, replacing any existing file.
pub fn write_file(path: &Path, accounts: &[Account]) -> Result<()> {
    fs::write(path, encode_accounts(accounts)?)?;
    Ok(())
}

/// Reads and decodes the whole file before returning anything.
pub fn read_file(path: &Path) -> Result<Vec<Account>> {
    let data = fs::read(path)?;
    decode_accounts(path, &data)
}

//! Directory dump format: one newline-delimited file per record kind.

use super::{Record, RecordReader, encode};
use crate::domain::account::Account;
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::error::Result;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

const LINE_SEPARATOR: u8 = b'\n';

/// Writes `records` to `path`, one per line.
///
/// An empty slice writes nothing and leaves any existing file untouched.
/// Returns whether the file was written.
pub fn write_records<T: Record>(path: &Path, records: &[T]) -> Result<bool> {
    if records.is_empty() {
        debug!(path = %path.display(), "nothing to dump");
        return Ok(false);
    }
    fs::write(path, encode(records, LINE_SEPARATOR)?)?;
    debug!(path = %path.display(), records = records.len(), "dump written");
    Ok(true)
}

/// Opens a dump file for decoding, or `None` if it does not exist.
pub fn open_records(path: &Path) -> Result<Option<RecordReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(RecordReader::new(path, file, LINE_SEPARATOR))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes the three dump files into `dir`, skipping empty collections.
pub fn write_dir(
    dir: &Path,
    accounts: &[Account],
    payments: &[Payment],
    favorites: &[Favorite],
) -> Result<()> {
    write_records(&dir.join(ACCOUNTS_FILE), accounts)?;
    write_records(&dir.join(PAYMENTS_FILE), payments)?;
    write_records(&dir.join(FAVORITES_FILE), favorites)?;
    Ok(())
}

/// Backs up `payments` into `dir` in chunks of at most `records` lines.
///
/// A history that fits in one chunk goes to `payments.dump`; a longer one is
/// split across `payments1.dump`, `payments2.dump`, and so on. A chunk size of
/// zero is treated as one.
pub fn write_payment_history(dir: &Path, payments: &[Payment], records: usize) -> Result<()> {
    if payments.is_empty() {
        return Ok(());
    }

    let records = records.max(1);
    if payments.len() <= records {
        write_records(&dir.join(PAYMENTS_FILE), payments)?;
        return Ok(());
    }

    for (index, chunk) in payments.chunks(records).enumerate() {
        let path = dir.join(format!("payments{}.dump", index + 1));
        write_records(&path, chunk)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Money;
    use crate::domain::payment::PaymentStatus;
    use crate::error::WalletError;

    fn payments(count: usize) -> Vec<Payment> {
        (0..count)
            .map(|i| Payment::new(format!("p{i}"), 1, Money::new(10), "auto"))
            .collect()
    }

    #[test]
    fn test_empty_collection_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACCOUNTS_FILE);

        let written = write_records::<Account>(&path, &[]).unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_payments_dump_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PAYMENTS_FILE);
        let mut records = payments(2);
        records[1].status = PaymentStatus::Ok;

        write_records(&path, &records).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "p0;1;10;auto;INPROGRESS\np1;1;10;auto;OK"
        );
    }

    #[test]
    fn test_favorites_dump_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FAVORITES_FILE);
        let payment = Payment::new("p1", 2, Money::new(300), "phone");
        let favorite = Favorite::from_payment("f1", "mobile top-up", &payment);

        write_records(&path, &[favorite]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "f1;2;mobile top-up;300;phone"
        );
    }

    #[test]
    fn test_open_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_records(&dir.path().join(PAYMENTS_FILE)).unwrap().is_none());
    }

    #[test]
    fn test_open_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(ACCOUNTS_FILE);
        fs::create_dir(&nested).unwrap();

        let reader = open_records(&nested);
        // Opening a directory succeeds on some platforms and fails on read.
        let result: Result<Vec<Account>> = match reader {
            Ok(Some(reader)) => reader.records().collect(),
            Ok(None) => panic!("directory reported as missing"),
            Err(e) => Err(e),
        };
        assert!(matches!(result, Err(WalletError::Io(_))));
    }

    #[test]
    fn test_history_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write_payment_history(dir.path(), &payments(3), 3).unwrap();

        let content = fs::read_to_string(dir.path().join(PAYMENTS_FILE)).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(!dir.path().join("payments1.dump").exists());
    }

    #[test]
    fn test_history_chunked_files() {
        let dir = tempfile::tempdir().unwrap();
        write_payment_history(dir.path(), &payments(5), 2).unwrap();

        assert!(!dir.path().join(PAYMENTS_FILE).exists());
        let expected = [
            ("payments1.dump", 2),
            ("payments2.dump", 2),
            ("payments3.dump", 1),
        ];
        for (name, lines) in expected {
            let content = fs::read_to_string(dir.path().join(name)).unwrap();
            assert_eq!(content.lines().count(), lines, "{name}");
        }
        assert!(!dir.path().join("payments4.dump").exists());
    }

    #[test]
    fn test_history_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_payment_history(dir.path(), &[], 2).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

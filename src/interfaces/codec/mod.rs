//! Text codecs for ledger records.
//!
//! Both on-disk formats are `;`-separated, unquoted and headerless; they only
//! differ in the record terminator. Records are (de)serialized positionally
//! through `serde`, so field order follows the struct definitions.

pub mod compact;
pub mod dump;

use crate::domain::account::Account;
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::error::{DecodeError, Result, WalletError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

pub const FIELD_SEPARATOR: u8 = b';';

/// A ledger record with a fixed number of fields.
pub trait Record: Serialize + DeserializeOwned {
    const FIELDS: usize;

    /// The free-text fields, checked by [`check_field`] before encoding.
    fn text_fields(&self) -> Vec<&str>;
}

impl Record for Account {
    const FIELDS: usize = 3;

    fn text_fields(&self) -> Vec<&str> {
        vec![self.phone.as_str()]
    }
}

impl Record for Payment {
    const FIELDS: usize = 5;

    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.category.as_str()]
    }
}

impl Record for Favorite {
    const FIELDS: usize = 5;

    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str(), self.category.as_str()]
    }
}

/// Rejects text that cannot be written unquoted: it must not contain the
/// field separator, the compact record separator, or a line break.
pub fn check_field(value: &str) -> Result<()> {
    if value.contains([';', '|', '\n', '\r']) {
        return Err(WalletError::InvalidField(value.to_string()));
    }
    Ok(())
}

/// Encodes `records` separated by `terminator`, without a trailing one.
pub fn encode<T: Record>(records: &[T], terminator: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(FIELD_SEPARATOR)
        .terminator(csv::Terminator::Any(terminator))
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    for record in records {
        for field in record.text_fields() {
            check_field(field)?;
        }
        writer.serialize(record)?;
    }

    let mut bytes = writer.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&terminator) {
        bytes.pop();
    }
    Ok(bytes)
}

/// Reads ledger records from a delimited source.
///
/// The source is split on the record terminator; every segment is counted,
/// so a `DecodeError` names the exact line (or compact record) even when
/// blank segments precede it. Fields are taken verbatim and deserialized
/// positionally through `csv`.
pub struct RecordReader<R: Read> {
    path: PathBuf,
    source: BufReader<R>,
    terminator: u8,
}

impl<R: Read> RecordReader<R> {
    /// `path` only labels decode errors; `source` is read as-is.
    ///
    /// With a `\n` terminator a trailing `\r` is dropped, so CRLF files decode.
    pub fn new(path: impl AsRef<Path>, source: R, terminator: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            source: BufReader::new(source),
            terminator,
        }
    }

    /// Returns an iterator that lazily decodes records.
    ///
    /// Blank segments are skipped. I/O failures surface as `WalletError::Io`.
    pub fn records<T: Record>(self) -> impl Iterator<Item = Result<T>> {
        let path = self.path;
        let terminator = self.terminator;
        self.source
            .split(terminator)
            .enumerate()
            .filter_map(move |(index, segment)| {
                let line = index as u64 + 1;
                match segment {
                    Ok(bytes) => decode_segment::<T>(&path, line, bytes, terminator).transpose(),
                    Err(e) => Some(Err(e.into())),
                }
            })
    }
}

/// Decodes one segment, or returns `None` if it is blank.
fn decode_segment<T: Record>(
    path: &Path,
    line: u64,
    mut bytes: Vec<u8>,
    terminator: u8,
) -> Result<Option<T>> {
    if terminator == b'\n' && bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    if bytes.is_empty() {
        return Ok(None);
    }

    let text =
        String::from_utf8(bytes).map_err(|e| DecodeError::new(path, line, e.to_string()))?;
    let record: csv::StringRecord = text.split(char::from(FIELD_SEPARATOR)).collect();
    if record.len() != T::FIELDS {
        return Err(DecodeError::new(
            path,
            line,
            format!("expected {} fields, found {}", T::FIELDS, record.len()),
        )
        .into());
    }
    record
        .deserialize(None)
        .map(Some)
        .map_err(|e| DecodeError::new(path, line, e.to_string()).into())
}

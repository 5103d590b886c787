//! Turn decoded export text into transactions

use csv::ReaderBuilder;

use crate::import::encoding::{decode, TextEncoding};
use crate::import::schema::{ColumnMap, SchemaVariant, AMOUNT_COLUMN, DATE_COLUMN};
use crate::locale::{parse_amount, parse_date};
use crate::types::*;

/// Transactions read from one export plus what was left behind
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Transactions in file order
    pub transactions: Vec<Transaction>,
    /// Rows skipped because their booking date could not be parsed
    pub dropped_rows: usize,
    /// Encoding the input was decoded with
    pub encoding: TextEncoding,
    /// Counterparty layouts found in the header, in lookup order
    pub variants: Vec<SchemaVariant>,
}

/// Decode raw export bytes and read their transactions.
///
/// Only an undecodable input fails; bad rows are dropped or defaulted.
pub fn read_transactions(bytes: &[u8]) -> ConvertResult<ImportOutcome> {
    let (text, encoding) = decode(bytes)?;
    log::info!("decoded input as {}", encoding);

    let mut outcome = read_transactions_from_str(&text);
    outcome.encoding = encoding;
    Ok(outcome)
}

/// Read transactions from already decoded text (`;` delimited, `"` quoted)
pub fn read_transactions_from_str(text: &str) -> ImportOutcome {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = match rdr.headers() {
        Ok(headers) => ColumnMap::resolve(headers.iter()),
        Err(e) => {
            log::warn!("could not read header row: {}", e);
            ColumnMap::default()
        }
    };
    log_columns(&columns);

    let mut transactions = Vec::new();
    let mut dropped_rows = 0;

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("skipping malformed record {}: {}", line + 1, e);
                dropped_rows += 1;
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let date = match parse_date(columns.date_field(&fields)) {
            Some(date) => date,
            None => {
                dropped_rows += 1;
                continue;
            }
        };

        transactions.push(Transaction::new(
            date,
            columns.counterparty_field(&fields),
            parse_amount(columns.amount_field(&fields)),
        ));
    }

    if dropped_rows > 0 {
        log::warn!(
            "dropped {} row(s) without a parseable {} date",
            dropped_rows,
            DATE_COLUMN
        );
    }
    log::debug!("read {} transaction(s)", transactions.len());

    ImportOutcome {
        transactions,
        dropped_rows,
        encoding: TextEncoding::Utf8,
        variants: columns.detected_variants(),
    }
}

fn log_columns(columns: &ColumnMap) {
    if columns.date.is_none() {
        log::warn!("header has no '{}' column, every row will be dropped", DATE_COLUMN);
    }
    if columns.amount.is_none() {
        log::warn!("header has no '{}' column, all amounts will be zero", AMOUNT_COLUMN);
    }
    if columns.counterparty.is_empty() {
        log::warn!("header has no known counterparty column");
    } else {
        log::debug!("counterparty columns: {:?}", columns.detected_variants());
    }
}

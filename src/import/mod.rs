use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

mod amount;
mod date;

pub use amount::parse_amount;
pub use date::parse_date;

use crate::error::ImportError;
use crate::record::TransactionRecord;

const DELIMITER: u8 = b';';
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const NUM_FIELDS: usize = 17;

const ACCOUNT: usize = 0;
const BOOKING_DATE: usize = 1;
const VALUE_DATE: usize = 2;
const BOOKING_TEXT: usize = 3;
const PURPOSE: usize = 4;
const CREDITOR_ID: usize = 5;
const MANDATE_REFERENCE: usize = 6;
const CUSTOMER_REFERENCE: usize = 7;
const COLLECTOR_REFERENCE: usize = 8;
const ORIGINAL_AMOUNT: usize = 9;
const CHARGEBACK_FEE: usize = 10;
const BENEFICIARY: usize = 11;
const BENEFICIARY_IBAN: usize = 12;
const BIC: usize = 13;
const AMOUNT: usize = 14;
const CURRENCY: usize = 15;
const ADDITIONAL_DETAILS: usize = 16;

/// Reads all transactions of a semicolon separated bank statement export.
///
/// The first row is a header and is skipped. Any malformed row fails the whole statement, so a
/// successful result never contains partially parsed records.
pub fn load(mut input_stream: impl Read) -> Result<Vec<TransactionRecord>, ImportError> {
    let mut content = Vec::new();
    input_stream.read_to_end(&mut content)?;
    let content = decode(maybe_remove_byte_order_mark(content));

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());
    if reader.headers()?.is_empty() {
        return Err(ImportError::MissingHeader);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(parse_record(&row?)?);
    }
    log::info!("Read {} transactions from statement", records.len());
    Ok(records)
}

pub fn load_file(path: &Path) -> Result<Vec<TransactionRecord>, ImportError> {
    log::info!("Reading statement {}", path.display());
    let file = std::fs::File::open(path)?;
    load(file)
}

fn maybe_remove_byte_order_mark(mut content: Vec<u8>) -> Vec<u8> {
    if content.starts_with(UTF8_BOM) {
        content.drain(..UTF8_BOM.len());
    }
    content
}

/// Statements are either UTF-8 or ISO-8859-1. Anything that isn't valid UTF-8 is read as
/// ISO-8859-1, where every byte is the code point of the same value.
fn decode(content: Vec<u8>) -> String {
    match String::from_utf8(content) {
        Ok(content) => content,
        Err(err) => {
            log::debug!("Statement isn't valid UTF-8, reading it as ISO-8859-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

fn parse_record(row: &StringRecord) -> Result<TransactionRecord, ImportError> {
    let line = row.position().map(|pos| pos.line()).unwrap_or_default();
    if row.len() != NUM_FIELDS {
        return Err(ImportError::FieldCount {
            line,
            expected: NUM_FIELDS,
            found: row.len(),
        });
    }
    let text = |index: usize| row[index].to_string();
    let date = |index: usize, column: &'static str| {
        parse_date(&row[index]).map_err(|_| ImportError::InvalidDate {
            line,
            column,
            value: row[index].to_string(),
        })
    };
    let amount = |index: usize, column: &'static str| {
        parse_amount(&row[index]).map_err(|_| ImportError::InvalidAmount {
            line,
            column,
            value: row[index].to_string(),
        })
    };

    Ok(TransactionRecord {
        account: text(ACCOUNT),
        booking_date: date(BOOKING_DATE, "booking date")?,
        value_date: date(VALUE_DATE, "value date")?,
        booking_text: text(BOOKING_TEXT),
        purpose: text(PURPOSE),
        creditor_id: text(CREDITOR_ID),
        mandate_reference: text(MANDATE_REFERENCE),
        customer_reference: text(CUSTOMER_REFERENCE),
        collector_reference: text(COLLECTOR_REFERENCE),
        original_amount: amount(ORIGINAL_AMOUNT, "original amount")?,
        chargeback_fee: amount(CHARGEBACK_FEE, "chargeback fee")?,
        beneficiary: text(BENEFICIARY),
        beneficiary_iban: text(BENEFICIARY_IBAN),
        bic: text(BIC),
        amount: amount(AMOUNT, "amount")?,
        currency: text(CURRENCY),
        additional_details: text(ADDITIONAL_DETAILS),
    })
}

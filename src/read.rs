use crate::data::{Error, HolderRecord, Timestamp, TransferRecord};
use csv::StringRecord;
use log::trace;
use rust_decimal::Decimal;
use std::str::FromStr;

// Column positions in the holders CSV.
const HOLDER_ACCOUNT: usize = 0;
const HOLDER_BALANCE: usize = 1;

// Column positions in the transactions CSV; column 1 is unused.
const TX_TIMESTAMP: usize = 0;
const TX_SENDER: usize = 2;
const TX_AMOUNT: usize = 3;
const TX_RECEIVER: usize = 4;

/// Reads the holders CSV (`account,balance`).
pub(crate) fn read_holders(text: &str) -> Result<Vec<HolderRecord>, Error> {
    read_rows(text, |record| HolderRecord {
        account: field(record, HOLDER_ACCOUNT).to_owned(),
        balance: parse_number(field(record, HOLDER_BALANCE)),
    })
}

/// Reads the transactions CSV (`timestamp,_,sender,amount,receiver`).
pub(crate) fn read_transfers(text: &str) -> Result<Vec<TransferRecord>, Error> {
    read_rows(text, |record| TransferRecord {
        timestamp: Timestamp::parse(field(record, TX_TIMESTAMP)),
        sender: field(record, TX_SENDER).to_owned(),
        amount: parse_number(field(record, TX_AMOUNT)),
        receiver: field(record, TX_RECEIVER).to_owned(),
    })
}

/// The first line is always dropped as a header, whatever it contains. The rest
/// is split on `\n` and `,` with no quoting; a blank line yields no row.
fn read_rows<T, F>(text: &str, mut row: F) -> Result<Vec<T>, Error>
where
    F: FnMut(&StringRecord) -> T,
{
    let Some((_header, body)) = text.split_once('\n') else {
        return Ok(Vec::new());
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(body.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        rows.push(row(&record));
    }
    Ok(rows)
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// Parses the longest numeric prefix of `text`, the way a lenient float parser
/// would. No numeric prefix, or a value outside the `Decimal` range, gives 0.
pub(crate) fn parse_number(text: &str) -> Decimal {
    let parsed = match numeric_prefix(text.trim_start()) {
        Some((mantissa, None)) => Decimal::from_str(&mantissa).ok(),
        Some((mantissa, Some(exp))) => {
            let scientific = format!("{mantissa}e{exp}");
            Decimal::from_scientific(&scientific).ok()
        }
        None => None,
    };
    match parsed {
        Some(value) => value,
        None => {
            trace!("Unparsable number {text:?}, using 0");
            Decimal::ZERO
        }
    }
}

/// Splits off `[sign]digits[.digits][e[sign]digits]`, returning a mantissa
/// normalized to always have a digit on both sides of the dot.
fn numeric_prefix(text: &str) -> Option<(String, Option<String>)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut mantissa = String::new();
    if let Some(&sign @ (b'+' | b'-')) = bytes.first() {
        if sign == b'-' {
            mantissa.push('-');
        }
        pos += 1;
    }
    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];
    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &text[frac_start..end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = end;
        }
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }
    if int_digits.is_empty() {
        mantissa.push('0');
    } else {
        mantissa.push_str(int_digits);
    }
    if !frac_digits.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_digits);
    }

    let mut exponent = None;
    if let Some(b'e' | b'E') = bytes.get(pos) {
        let mut exp_pos = pos + 1;
        let mut exp = String::new();
        if let Some(&sign @ (b'+' | b'-')) = bytes.get(exp_pos) {
            if sign == b'-' {
                exp.push('-');
            }
            exp_pos += 1;
        }
        let digits_start = exp_pos;
        while exp_pos < bytes.len() && bytes[exp_pos].is_ascii_digit() {
            exp_pos += 1;
        }
        if exp_pos > digits_start {
            exp.push_str(&text[digits_start..exp_pos]);
            exponent = Some(exp);
        }
    }
    Some((mantissa, exponent))
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// CSS color string handed to the renderer.
pub type Color = &'static str;

/// One line of the holders CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRecord {
    pub account: String,
    pub balance: Decimal,
}

/// One line of the transactions CSV. The column between the timestamp and the
/// sender is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub timestamp: Timestamp,
    pub sender: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub receiver: String,
}

/// A point in time, or the "invalid date" sentinel when the source text could
/// not be parsed. We keep the sentinel instead of dropping the transfer because
/// the renderer still wants every transaction listed, and a bad date in one
/// column shouldn't make the amount or the accounts disappear. Invalid
/// timestamps order before every valid one (plain `Option` ordering), so a
/// sort by time never has to special-case them, and they are written out as
/// `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Option<DateTime<Utc>>);

/// Date-time layouts without an offset, read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    pub const INVALID: Timestamp = Timestamp(None);

    /// Lenient date parsing; never fails. Besides RFC 3339 and the naive
    /// layouts above, a bare `YYYY-MM-DD`, `YYYY-MM` or `YYYY` is midnight UTC
    /// on the first day it names.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Timestamp(Some(dt.with_timezone(&Utc)));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Self::from_naive(naive);
            }
        }
        let date = match text.len() {
            4 => format!("{text}-01-01"),
            7 => format!("{text}-01"),
            _ => text.to_owned(),
        };
        NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::from_naive)
            .unwrap_or(Self::INVALID)
    }

    fn from_naive(naive: NaiveDateTime) -> Self {
        Timestamp(Some(Utc.from_utc_datetime(&naive)))
    }

    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(Some(dt))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(dt) => {
                let text = dt.to_rfc3339_opts(SecondsFormat::Millis, true);
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }
}

/// An account drawn as a circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// Share of the total supply, in percent.
    pub percentage: f64,
    pub radius: f64,
    pub color: Color,
    pub is_treasury: bool,
}

/// A transfer between two accounts that are both drawn as nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub timestamp: Timestamp,
    pub color: Color,
}

/// Everything the renderer needs. `transactions` holds every parsed transfer,
/// including the ones that did not become links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
    pub transactions: Vec<TransferRecord>,
    pub treasury_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supply: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_balance: Decimal,
}

/// Failures that prevent a whole graph from being built. Unparsable fields are
/// not errors: they fall back to zero or to `Timestamp::INVALID`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No holder records, cannot pick a treasury account")]
    EmptyHolderSet,
    #[error("Total supply overflows the decimal range")]
    SupplyOverflow,
    #[error("Unreadable CSV input: {0}")]
    Csv(#[from] csv::Error),
}

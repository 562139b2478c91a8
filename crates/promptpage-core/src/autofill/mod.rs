//! Auto-filled variable values
//!
//! An auto-fill kind maps a reference instant to a default value for a
//! variable. The instant is always passed in by the caller; nothing in this
//! module reads the clock.

mod infer;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use infer::{infer_meta_by_name, AUTO_FILL_NAMES};

const WEEKDAY_NAMES: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];

/// Kind of value computed from the reference instant
///
/// Unrecognized tags are kept verbatim in [`AutoFillKind::Other`] and resolve
/// to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutoFillKind {
    Date,
    Time,
    DateTime,
    Weekday,
    Month,
    Quarter,
    Timestamp,
    TradingDay,
    Other(String),
}

impl AutoFillKind {
    pub fn as_str(&self) -> &str {
        match self {
            AutoFillKind::Date => "date",
            AutoFillKind::Time => "time",
            AutoFillKind::DateTime => "datetime",
            AutoFillKind::Weekday => "weekday",
            AutoFillKind::Month => "month",
            AutoFillKind::Quarter => "quarter",
            AutoFillKind::Timestamp => "timestamp",
            AutoFillKind::TradingDay => "trading_day",
            AutoFillKind::Other(tag) => tag,
        }
    }

    /// Compute the value for `now`, using its local calendar fields
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let local = now.naive_local();

        match self {
            AutoFillKind::Date => format_date(local.date()),
            AutoFillKind::Time => local.format("%H:%M:%S").to_string(),
            AutoFillKind::DateTime => local.format("%Y-%m-%d %H:%M:%S").to_string(),
            AutoFillKind::Weekday => {
                WEEKDAY_NAMES[local.weekday().num_days_from_sunday() as usize].to_string()
            }
            AutoFillKind::Month => local.format("%Y-%m").to_string(),
            AutoFillKind::Quarter => format!("{}Q{}", local.year(), local.month0() / 3 + 1),
            AutoFillKind::Timestamp => now.timestamp().to_string(),
            AutoFillKind::TradingDay => format_date(last_weekday(local.date())),
            AutoFillKind::Other(_) => String::new(),
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Roll a weekend date back to the preceding Friday
fn last_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}

impl FromStr for AutoFillKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date" => AutoFillKind::Date,
            "time" => AutoFillKind::Time,
            "datetime" => AutoFillKind::DateTime,
            "weekday" => AutoFillKind::Weekday,
            "month" => AutoFillKind::Month,
            "quarter" => AutoFillKind::Quarter,
            "timestamp" => AutoFillKind::Timestamp,
            "trading_day" => AutoFillKind::TradingDay,
            other => AutoFillKind::Other(other.to_string()),
        })
    }
}

impl From<String> for AutoFillKind {
    fn from(tag: String) -> Self {
        match tag.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<AutoFillKind> for String {
    fn from(kind: AutoFillKind) -> Self {
        match kind {
            AutoFillKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AutoFillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an auto-fill tag against `now`; unknown tags yield `""`
pub fn resolve_auto_fill<Tz: TimeZone>(kind: &str, now: &DateTime<Tz>) -> String {
    AutoFillKind::from(kind.to_string()).resolve(now)
}

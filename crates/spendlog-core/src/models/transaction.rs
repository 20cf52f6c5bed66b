//! Transaction data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel stored in the image column when no receipt was attached.
pub const NO_IMAGE: &str = "NO_IMAGE";

/// Origin of a transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// All fields supplied directly by the user.
    Manual,
    /// Fields derived from an uploaded receipt image.
    Automatic,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("manual") {
            Some(Self::Manual)
        } else if s.eq_ignore_ascii_case("automatic") {
            Some(Self::Automatic)
        } else {
            None
        }
    }
}

/// A persisted transaction row. Write-once: no update or delete exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, ascending with insertion order.
    pub id: i64,

    /// Calendar date of the expense (no time component).
    pub date: NaiveDate,

    /// Non-negative monetary value with at most two fractional digits.
    pub amount: Decimal,

    /// One-line description of the purchase.
    pub description: String,

    /// Stored receipt image, when one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Mode of the request that created the record.
    pub kind: TransactionKind,
}

/// A validated record ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub image_path: Option<String>,
    pub kind: TransactionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_flags() {
        assert_eq!(TransactionKind::parse("manual"), Some(TransactionKind::Manual));
        assert_eq!(TransactionKind::parse("Automatic"), Some(TransactionKind::Automatic));
        assert_eq!(TransactionKind::parse("bulk"), None);
        assert_eq!(TransactionKind::parse(""), None);
    }

    #[test]
    fn mode_round_trips_through_as_str() {
        for kind in [TransactionKind::Manual, TransactionKind::Automatic] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
    }
}

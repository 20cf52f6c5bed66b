//! Receipt parser combining the individual field extractors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::{extract_description, AmountExtractor, DateExtractor, FieldExtractor};

/// Fields recovered from one pass over extracted receipt text.
#[derive(Debug, Clone)]
pub struct ParsedReceipt {
    /// Extracted calendar date, when one was found.
    pub date: Option<NaiveDate>,

    /// Extracted monetary amount, when one was found.
    pub amount: Option<Decimal>,

    /// Extracted description; falls back to a fixed placeholder.
    pub description: String,

    /// Fields the parser could not recover.
    pub warnings: Vec<String>,
}

/// Parser applying the date, amount and description rules to a text blob.
pub struct ReceiptParser {
    dates: DateExtractor,
    amounts: AmountExtractor,
}

impl ReceiptParser {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            amounts: AmountExtractor::new(),
        }
    }

    /// Run all three extractors over the text.
    pub fn parse(&self, text: &str) -> ParsedReceipt {
        info!("parsing receipt text ({} characters)", text.chars().count());

        let mut warnings = Vec::new();

        let date = self.dates.extract(text);
        if date.is_none() {
            warnings.push("could not extract a date".to_string());
        }

        let amount = self.amounts.extract(text);
        if amount.is_none() {
            warnings.push("could not extract an amount".to_string());
        }

        let description = extract_description(text);

        debug!(?date, ?amount, description = %description, "receipt fields extracted");

        ParsedReceipt {
            date,
            amount,
            description,
            warnings,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

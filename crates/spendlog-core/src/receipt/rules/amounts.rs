//! Monetary amount extraction from receipt text.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT;
use super::FieldExtractor;

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Decimal> {
        let caps = AMOUNT.captures(text)?;

        let mut raw = caps[1].replace(',', "");
        if let Some(fraction) = caps.get(2) {
            raw.push_str(fraction.as_str());
        }

        Decimal::from_str(&raw).ok()
    }
}

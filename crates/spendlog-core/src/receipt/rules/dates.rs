//! Date extraction from receipt text.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_YMD};
use super::FieldExtractor;

/// Date field extractor. Day-first when a slash date is ambiguous.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    /// Only the first match of each pattern is considered. A slash match
    /// that is not a valid calendar date does not promote later slash
    /// candidates; the scan moves on to the dash pattern instead.
    fn extract(&self, text: &str) -> Option<NaiveDate> {
        if let Some(caps) = DATE_DMY.captures(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }

        if let Some(caps) = DATE_YMD.captures(text) {
            let year: i32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let day: u32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }

        None
    }
}

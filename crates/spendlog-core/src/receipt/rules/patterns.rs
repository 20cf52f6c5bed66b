//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Slash-separated day-first dates: 5/3/2024, 05/03/2024
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"
    ).unwrap();

    // Dash-separated ISO-style dates: 2024-3-5, 2024-03-05
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    // Money amounts with optional comma thousands separators and an
    // optional two-digit fraction: 1,234.56 / 1234.56 / 5.00 / 42
    pub static ref AMOUNT: Regex = Regex::new(
        r"\b(\d{1,3}(?:,\d{3})+|\d+)(\.\d{2})?\b"
    ).unwrap();
}

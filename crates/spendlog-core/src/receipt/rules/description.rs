//! Description extraction from receipt text.

/// Returned when no line of the source text qualifies as a description.
pub const NO_DESCRIPTION: &str = "No description found";

/// First line whose trimmed length exceeds five characters, trimmed.
///
/// Unlike the date and amount extractors this always yields a value: the
/// fixed [`NO_DESCRIPTION`] placeholder when no line qualifies.
pub fn extract_description(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| line.chars().count() > 5)
        .map(str::to_string)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

//! Rule-based field extractors for receipt text.
//!
//! Each extractor considers only the first pattern match in a
//! left-to-right scan of the text; there is no ranking of multiple
//! candidates.

pub mod amounts;
pub mod dates;
pub mod description;
pub mod patterns;

pub use amounts::AmountExtractor;
pub use dates::DateExtractor;
pub use description::{extract_description, NO_DESCRIPTION};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, or nothing when no match is usable.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

//! Receipt field extraction and transaction assembly.

pub mod assembler;
pub mod parser;
pub mod rules;

pub use assembler::{assemble_manual, merge_automatic, CreationRequest, ExplicitFields};
pub use parser::{ParsedReceipt, ReceiptParser};
pub use rules::{extract_description, AmountExtractor, DateExtractor, FieldExtractor, NO_DESCRIPTION};

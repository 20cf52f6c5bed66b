//! Core library for spendlog expense tracking.
//!
//! This crate provides:
//! - Receipt text extraction (external OCR engine with vision-AI fallback)
//! - Rule-based field extraction (date, amount, description)
//! - Transaction assembly with manual/automatic merge semantics

pub mod error;
pub mod extract;
pub mod models;
pub mod receipt;

pub use error::{ExtractionError, Result, SpendlogError, ValidationError};
pub use extract::{TesseractEngine, TextExtractor, VisionClient};
pub use models::config::{OcrConfig, ServerConfig, SpendlogConfig, VisionConfig};
pub use models::transaction::{NewTransaction, Transaction, TransactionKind, NO_IMAGE};
pub use receipt::{
    assemble_manual, merge_automatic, CreationRequest, ExplicitFields, ParsedReceipt,
    ReceiptParser,
};

//! Data models and configuration.

pub mod config;
pub mod transaction;

pub use config::{OcrConfig, ServerConfig, SpendlogConfig, VisionConfig};
pub use transaction::{NewTransaction, Transaction, TransactionKind, NO_IMAGE};

//! Spreadsheet export of the full transaction set.

use std::path::Path;

use sqlx::{Pool, Sqlite};
use tracing::info;

use spendlog_core::NO_IMAGE;

use crate::error::ApiError;
use crate::store;

/// Write every stored record to a CSV file at `path`, replacing any
/// previous artifact. One row per transaction, columns in store schema
/// order; deterministic for a fixed store snapshot.
pub async fn export_all(pool: &Pool<Sqlite>, path: &Path) -> Result<(), ApiError> {
    let records = store::list_all(pool).await?;
    let row_count = records.len();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "id",
        "date",
        "amount",
        "description",
        "image_path",
        "transaction_type",
    ])?;

    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.date.to_string(),
            record.amount.to_string(),
            record.description,
            record.image_path.unwrap_or_else(|| NO_IMAGE.to_string()),
            record.kind.as_str().to_string(),
        ])?;
    }
    writer.flush()?;

    info!("exported {row_count} transactions to {}", path.display());
    Ok(())
}

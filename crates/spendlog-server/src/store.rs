//! SQLite-backed transaction store.
//!
//! Append-only: a single-row insert per creation request and an ordered
//! scan for read-back. No update or delete exists.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Row, Sqlite};

use spendlog_core::{NewTransaction, Transaction, TransactionKind, NO_IMAGE};

/// Insert a validated record, returning its assigned identifier.
pub async fn insert(pool: &Pool<Sqlite>, record: &NewTransaction) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO transactions (date, amount, description, image_path, transaction_type)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(record.date.to_string())
    .bind(record.amount.to_string())
    .bind(&record.description)
    .bind(record.image_path.as_deref().unwrap_or(NO_IMAGE))
    .bind(record.kind.as_str())
    .fetch_one(pool)
    .await?;

    row.try_get(0)
}

/// All records, ordered by identifier ascending.
pub async fn list_all(pool: &Pool<Sqlite>) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id, date, amount, description, image_path, transaction_type
        FROM transactions
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let date_text: String = row.get("date");
        let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|e| {
            sqlx::Error::Decode(format!("invalid date {date_text}: {e}").into())
        })?;

        let amount_text: String = row.get("amount");
        let amount = Decimal::from_str(&amount_text).map_err(|e| {
            sqlx::Error::Decode(format!("invalid amount {amount_text}: {e}").into())
        })?;

        let image_text: String = row.get("image_path");
        let image_path = (image_text != NO_IMAGE).then_some(image_text);

        let kind_text: String = row.get("transaction_type");
        let kind = TransactionKind::parse(&kind_text).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown transaction type {kind_text}").into())
        })?;

        Ok(Transaction {
            id: row.get("id"),
            date,
            amount,
            description: row.get("description"),
            image_path,
            kind,
        })
    })
    .collect()
}

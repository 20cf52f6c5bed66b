//! HTTP handlers for the transaction endpoints.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info};

use spendlog_core::{
    assemble_manual, merge_automatic, CreationRequest, ExplicitFields, ValidationError, NO_IMAGE,
};

use crate::error::ApiError;
use crate::server::AppState;
use crate::{export, store};

/// `GET /` - landing page with the submission form.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Decoded `/add_transaction` submission, before validation.
#[derive(Debug, Default)]
struct SubmittedForm {
    mode: Option<String>,
    date: Option<String>,
    amount: Option<String>,
    description: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

/// `POST /add_transaction` - create one record from a multipart form.
pub async fn add_transaction(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_form(multipart).await?;

    let mode = form
        .mode
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ValidationError::MissingField("transaction_Type"))?
        .to_string();
    let fields = parse_fields(&form)?;

    // The upload is saved before extraction or persistence runs; a save
    // failure is a 500 and nothing else happens.
    let saved_image = match &form.image {
        Some((file_name, bytes)) => {
            Some(save_upload(&state.config.server.upload_dir, file_name, bytes).await?)
        }
        None => None,
    };
    let stored_path = saved_image
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());

    let request = CreationRequest::from_form(&mode, fields, saved_image)?;

    let record = match request {
        CreationRequest::Manual { fields } => assemble_manual(fields, stored_path)?,
        CreationRequest::Automatic { image, overrides } => {
            let extraction = state
                .extractor
                .extract_text(&image)
                .await
                .map(|text| state.parser.parse(&text));
            if let Ok(parsed) = &extraction {
                debug!(?parsed, "extraction result before merge");
            }
            merge_automatic(extraction, overrides, stored_path)?
        }
    };

    let id = store::insert(&state.db, &record).await?;
    info!("stored transaction {id} ({})", record.kind.as_str());

    Ok(Json(json!({
        "message": "Transaction added successfully!",
        "id": id,
    })))
}

/// `GET /transactions` - the full ordered record set as field tuples.
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = store::list_all(&state.db).await?;

    let tuples: Vec<_> = rows
        .into_iter()
        .map(|t| {
            (
                t.id,
                t.date.to_string(),
                t.amount.to_string(),
                t.description,
                t.image_path.unwrap_or_else(|| NO_IMAGE.to_string()),
                t.kind.as_str().to_string(),
            )
        })
        .collect();

    Ok(Json(tuples))
}

/// `GET /export` - regenerate the spreadsheet and return it for download.
pub async fn export_transactions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let path = &state.config.server.export_path;
    export::export_all(&state.db, path).await?;

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transactions.csv".to_string());

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];

    Ok((headers, bytes))
}

async fn read_form(mut multipart: Multipart) -> Result<SubmittedForm, ApiError> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "transaction_Type" => form.mode = Some(field.text().await?),
            "date" => form.date = Some(field.text().await?),
            "amount" => form.amount = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "image" => {
                let file_name = field.file_name().unwrap_or("receipt").to_string();
                let bytes = field.bytes().await?;
                // Browsers post an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.image = Some((file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_fields(form: &SubmittedForm) -> Result<ExplicitFields, ValidationError> {
    let date = match non_empty(form.date.as_deref()) {
        Some(raw) => Some(parse_form_date(raw)?),
        None => None,
    };

    let amount = match non_empty(form.amount.as_deref()) {
        Some(raw) => Some(Decimal::from_str(raw).map_err(|_| {
            ValidationError::InvalidField {
                field: "amount",
                value: raw.to_string(),
            }
        })?),
        None => None,
    };

    let description = non_empty(form.description.as_deref()).map(str::to_string);

    Ok(ExplicitFields {
        date,
        amount,
        description,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// HTML date inputs post ISO dates; day-first slash dates are accepted too.
fn parse_form_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| ValidationError::InvalidField {
            field: "date",
            value: raw.to_string(),
        })
}

/// Strip path components from an uploaded filename and replace anything
/// outside letters, digits, dots, dashes and underscores.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "receipt".to_string()
    } else {
        cleaned.to_string()
    }
}

async fn save_upload(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    let path = dir.join(sanitize_filename(file_name));
    tokio::fs::write(&path, bytes).await?;
    debug!("saved upload to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("receipt.png"), "receipt.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(r"C:\photos\bill 01.jpg"), "bill_01.jpg");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("..."), "receipt");
    }

    #[test]
    fn form_dates_accept_iso_and_day_first() {
        assert_eq!(
            parse_form_date("2024-03-05").ok(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_form_date("05/03/2024").ok(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert!(parse_form_date("yesterday").is_err());
    }

    #[test]
    fn blank_fields_parse_as_absent() {
        let form = SubmittedForm {
            date: Some("  ".to_string()),
            amount: Some(String::new()),
            description: Some(" Lunch ".to_string()),
            ..SubmittedForm::default()
        };

        let fields = parse_fields(&form).unwrap();
        assert_eq!(fields.date, None);
        assert_eq!(fields.amount, None);
        assert_eq!(fields.description, Some("Lunch".to_string()));
    }

    #[test]
    fn unparseable_amount_is_invalid_not_absent() {
        let form = SubmittedForm {
            amount: Some("twelve".to_string()),
            ..SubmittedForm::default()
        };

        assert!(matches!(
            parse_fields(&form),
            Err(ValidationError::InvalidField { field: "amount", .. })
        ));
    }

    #[test]
    fn save_upload_writes_into_the_given_dir() {
        let dir = tempfile::tempdir().unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let path = rt
            .block_on(save_upload(dir.path(), "../sneaky.png", b"bytes"))
            .unwrap();

        assert_eq!(path, dir.path().join("sneaky.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
    }
}

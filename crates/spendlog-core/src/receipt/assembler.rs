//! Transaction assembly: merging explicit fields with extracted ones.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::parser::ParsedReceipt;
use super::rules::NO_DESCRIPTION;
use crate::error::{ExtractionError, ValidationError};
use crate::models::transaction::{NewTransaction, TransactionKind};

/// Fields supplied directly on the request, all optional before merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitFields {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

/// An inbound record-creation request, after form decoding.
#[derive(Debug, Clone)]
pub enum CreationRequest {
    /// All fields come from user input; an image, if any, is stored as an
    /// attachment without being processed.
    Manual { fields: ExplicitFields },

    /// Fields are derived from the uploaded image; explicit values fill
    /// gaps the extraction leaves.
    Automatic {
        image: PathBuf,
        overrides: ExplicitFields,
    },
}

impl CreationRequest {
    /// Decode the form's mode flag into the tagged request variant.
    ///
    /// Automatic mode without an image is a validation failure, never a
    /// silent fallback to manual behavior.
    pub fn from_form(
        mode: &str,
        fields: ExplicitFields,
        image: Option<PathBuf>,
    ) -> Result<Self, ValidationError> {
        match TransactionKind::parse(mode) {
            Some(TransactionKind::Manual) => Ok(Self::Manual { fields }),
            Some(TransactionKind::Automatic) => match image {
                Some(image) => Ok(Self::Automatic {
                    image,
                    overrides: fields,
                }),
                None => Err(ValidationError::MissingImage),
            },
            None => Err(ValidationError::UnknownMode(mode.to_string())),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Manual { .. } => TransactionKind::Manual,
            Self::Automatic { .. } => TransactionKind::Automatic,
        }
    }
}

/// Build a manual-mode record from explicit fields alone.
pub fn assemble_manual(
    fields: ExplicitFields,
    image_path: Option<String>,
) -> Result<NewTransaction, ValidationError> {
    let date = fields.date.ok_or(ValidationError::MissingField("date"))?;
    let amount = fields
        .amount
        .ok_or(ValidationError::MissingField("amount"))?;
    let description = fields
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or(ValidationError::MissingField("description"))?;

    validate_amount(&amount)?;

    Ok(NewTransaction {
        date,
        amount,
        description,
        image_path,
        kind: TransactionKind::Manual,
    })
}

/// Merge extraction output with explicit overrides for automatic mode.
///
/// Precedence: an extracted value wins whenever extraction yields one; an
/// explicit field is used only where extraction came up empty. The
/// description placeholder counts as empty, so an explicit description
/// replaces it. When extraction failed outright the explicit fields alone
/// are used, and any field still missing after the merge rejects the
/// request before anything is persisted.
pub fn merge_automatic(
    extraction: Result<ParsedReceipt, ExtractionError>,
    overrides: ExplicitFields,
    image_path: Option<String>,
) -> Result<NewTransaction, ValidationError> {
    let (date, amount, description) = match extraction {
        Ok(parsed) => {
            let description = if parsed.description == NO_DESCRIPTION {
                overrides.description.unwrap_or(parsed.description)
            } else {
                parsed.description
            };
            (
                parsed.date.or(overrides.date),
                parsed.amount.or(overrides.amount),
                Some(description),
            )
        }
        Err(err) => {
            warn!("extraction failed, falling back to explicit fields: {err}");
            (overrides.date, overrides.amount, overrides.description)
        }
    };

    let date = date.ok_or(ValidationError::MissingField("date"))?;
    let amount = amount.ok_or(ValidationError::MissingField("amount"))?;
    let description = description
        .filter(|d| !d.trim().is_empty())
        .ok_or(ValidationError::MissingField("description"))?;

    validate_amount(&amount)?;

    Ok(NewTransaction {
        date,
        amount,
        description,
        image_path,
        kind: TransactionKind::Automatic,
    })
}

/// Amounts must be non-negative with at most two fractional digits.
fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.scale() > 2 {
        return Err(ValidationError::InvalidField {
            field: "amount",
            value: amount.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn explicit(date_s: &str, amount_s: &str, description: &str) -> ExplicitFields {
        ExplicitFields {
            date: Some(date(date_s)),
            amount: Some(dec(amount_s)),
            description: Some(description.to_string()),
        }
    }

    fn parsed(date_s: &str, amount_s: &str, description: &str) -> ParsedReceipt {
        ParsedReceipt {
            date: Some(date(date_s)),
            amount: Some(dec(amount_s)),
            description: description.to_string(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn manual_uses_fields_as_submitted() {
        let record =
            assemble_manual(explicit("2024-03-05", "12.50", "Lunch at the corner"), None).unwrap();

        assert_eq!(
            record,
            NewTransaction {
                date: date("2024-03-05"),
                amount: dec("12.50"),
                description: "Lunch at the corner".to_string(),
                image_path: None,
                kind: TransactionKind::Manual,
            }
        );
    }

    #[test]
    fn manual_rejects_missing_fields() {
        let mut fields = explicit("2024-03-05", "12.50", "Lunch");
        fields.amount = None;

        assert!(matches!(
            assemble_manual(fields, None),
            Err(ValidationError::MissingField("amount"))
        ));
    }

    #[test]
    fn manual_rejects_blank_description() {
        let fields = explicit("2024-03-05", "12.50", "   ");

        assert!(matches!(
            assemble_manual(fields, None),
            Err(ValidationError::MissingField("description"))
        ));
    }

    #[test]
    fn manual_rejects_negative_amount() {
        let fields = explicit("2024-03-05", "-4.00", "Refund?");

        assert!(matches!(
            assemble_manual(fields, None),
            Err(ValidationError::InvalidField { field: "amount", .. })
        ));
    }

    #[test]
    fn manual_rejects_excess_fraction_digits() {
        let fields = explicit("2024-03-05", "1.005", "Fuel");

        assert!(matches!(
            assemble_manual(fields, None),
            Err(ValidationError::InvalidField { field: "amount", .. })
        ));
    }

    #[test]
    fn automatic_uses_extracted_values_without_overrides() {
        let record = merge_automatic(
            Ok(parsed("2024-03-05", "1234.56", "Grocery Store Purchase")),
            ExplicitFields::default(),
            Some("uploads/receipt.png".to_string()),
        )
        .unwrap();

        assert_eq!(record.date, date("2024-03-05"));
        assert_eq!(record.amount, dec("1234.56"));
        assert_eq!(record.description, "Grocery Store Purchase");
        assert_eq!(record.kind, TransactionKind::Automatic);
    }

    #[test]
    fn extracted_values_win_over_explicit_ones() {
        let record = merge_automatic(
            Ok(parsed("2024-03-05", "1234.56", "Grocery Store Purchase")),
            explicit("2020-01-01", "1.00", "typed by hand"),
            None,
        )
        .unwrap();

        assert_eq!(record.date, date("2024-03-05"));
        assert_eq!(record.amount, dec("1234.56"));
        assert_eq!(record.description, "Grocery Store Purchase");
    }

    #[test]
    fn explicit_fields_fill_extraction_gaps() {
        let gaps = ParsedReceipt {
            date: None,
            amount: Some(dec("9.99")),
            description: "Corner Bakery".to_string(),
            warnings: vec!["could not extract a date".to_string()],
        };

        let record = merge_automatic(Ok(gaps), explicit("2024-03-05", "1.00", "ignored"), None)
            .unwrap();

        assert_eq!(record.date, date("2024-03-05"));
        assert_eq!(record.amount, dec("9.99"));
        assert_eq!(record.description, "Corner Bakery");
    }

    #[test]
    fn explicit_description_replaces_the_placeholder() {
        let record = merge_automatic(
            Ok(parsed("2024-03-05", "9.99", NO_DESCRIPTION)),
            explicit("2020-01-01", "1.00", "Hardware store"),
            None,
        )
        .unwrap();

        assert_eq!(record.description, "Hardware store");
    }

    #[test]
    fn placeholder_survives_when_no_override_exists() {
        let record = merge_automatic(
            Ok(parsed("2024-03-05", "9.99", NO_DESCRIPTION)),
            ExplicitFields::default(),
            None,
        )
        .unwrap();

        assert_eq!(record.description, NO_DESCRIPTION);
    }

    #[test]
    fn extraction_failure_falls_back_to_explicit_fields() {
        let record = merge_automatic(
            Err(ExtractionError::EngineUnavailable("not found".to_string())),
            explicit("2024-03-05", "12.50", "Lunch"),
            Some("uploads/receipt.png".to_string()),
        )
        .unwrap();

        assert_eq!(record.date, date("2024-03-05"));
        assert_eq!(record.amount, dec("12.50"));
        assert_eq!(record.kind, TransactionKind::Automatic);
    }

    #[test]
    fn extraction_failure_without_enough_fields_escalates() {
        let result = merge_automatic(
            Err(ExtractionError::Timeout(20)),
            ExplicitFields::default(),
            None,
        );

        assert!(matches!(result, Err(ValidationError::MissingField("date"))));
    }

    #[test]
    fn automatic_without_image_is_rejected_at_decode_time() {
        let result = CreationRequest::from_form("automatic", ExplicitFields::default(), None);

        assert!(matches!(result, Err(ValidationError::MissingImage)));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = CreationRequest::from_form("bulk", ExplicitFields::default(), None);

        assert!(matches!(result, Err(ValidationError::UnknownMode(_))));
    }

    #[test]
    fn manual_keeps_attachment_without_processing() {
        let request = CreationRequest::from_form(
            "manual",
            explicit("2024-03-05", "12.50", "Lunch"),
            Some(PathBuf::from("uploads/receipt.png")),
        )
        .unwrap();

        assert_eq!(request.kind(), TransactionKind::Manual);
        assert!(matches!(request, CreationRequest::Manual { .. }));
    }
}

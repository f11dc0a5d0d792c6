use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// A payment record. Amounts are integer cents; the payment number is
/// assigned server-side.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `MDA-YYYYMMDDNNNN` where `NNNN` is a per-day sequence.
    pub payment_number: String,
    pub amount_cents: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: i64,
}

/// Builds a payment number from a date and a per-day sequence value.
pub fn format_payment_number(date: NaiveDate, sequence: i64) -> String {
    format!("MDA-{}{:04}", date.format("%Y%m%d"), sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_number_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(format_payment_number(date, 1), "MDA-202608290001");
        assert_eq!(format_payment_number(date, 42), "MDA-202608290042");
    }

    #[test]
    fn test_payment_number_sequence_width_grows_past_four_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_payment_number(date, 12345), "MDA-2026010212345");
    }

    #[test]
    fn test_create_transaction_requires_positive_amount() {
        assert!(CreateTransactionRequest { amount_cents: 0 }.validate().is_err());
        assert!(
            CreateTransactionRequest { amount_cents: 2500 }
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Completed).unwrap(),
            r#""completed""#
        );
    }
}

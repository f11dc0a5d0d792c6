use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Transaction, TransactionStatus, format_payment_number};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, payment_number, amount_cents, status, created_at, updated_at";

pub struct TransactionService;

impl TransactionService {
    pub async fn list(db: &PgPool) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch transactions")?;

        Ok(transactions)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch transaction by id")?;

        Ok(transaction)
    }

    /// Records a payment for the user. The payment number embeds
    /// today's date plus a per-day sequence derived from the current
    /// day's row count.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        amount_cents: i64,
    ) -> Result<Transaction, AppError> {
        let today = Utc::now().date_naive();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM transactions WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(db)
        .await
        .context("Failed to count today's transactions")?;

        let payment_number = format_payment_number(today, count + 1);

        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "INSERT INTO transactions (user_id, payment_number, amount_cents, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&payment_number)
        .bind(amount_cents)
        .bind(TransactionStatus::Completed)
        .fetch_one(db)
        .await
        .context("Failed to insert transaction")?;

        Ok(transaction)
    }
}

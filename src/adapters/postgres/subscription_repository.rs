//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::membership::SubscriptionWindow;
use crate::ports::SubscriptionRepository;

use super::rows::SubscriptionRow;

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionWindow>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, status, current_period_start, current_period_end, created_at
            FROM subscriptions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find subscription", e))?;

        row.map(SubscriptionWindow::try_from).transpose()
    }

    async fn update(&self, window: &SubscriptionWindow) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                status = $2,
                current_period_start = $3,
                current_period_end = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(window.id.as_uuid())
        .bind(window.status.as_str())
        .bind(window.current_period_start.map(|t| *t.as_datetime()))
        .bind(window.current_period_end.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update subscription", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            ));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of MembershipReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::MembershipTier;
use crate::ports::MembershipReader;

use super::rows::parse_tier;

/// PostgreSQL implementation of the MembershipReader port.
///
/// The tier lives on the `users` row.
pub struct PostgresMembershipReader {
    pool: PgPool,
}

impl PostgresMembershipReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipReader for PostgresMembershipReader {
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<MembershipTier>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT membership_tier
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to get tier", e))?;

        row.map(|(tier,)| parse_tier(&tier)).transpose()
    }
}

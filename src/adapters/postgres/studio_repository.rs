//! PostgreSQL implementation of StudioRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, StudioId, Timestamp, UserId};
use crate::domain::membership::StudioType;
use crate::domain::studio::StudioListing;
use crate::ports::StudioRepository;

use super::rows::parse_studio_status;

/// PostgreSQL implementation of the StudioRepository port.
pub struct PostgresStudioRepository {
    pool: PgPool,
}

impl PostgresStudioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for listing queries.
#[derive(Debug, sqlx::FromRow)]
struct StudioRow {
    id: Uuid,
    owner_id: Uuid,
    status: String,
    studio_types: Vec<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StudioRow> for StudioListing {
    type Error = DomainError;

    fn try_from(row: StudioRow) -> Result<Self, Self::Error> {
        Ok(StudioListing {
            id: StudioId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            status: parse_studio_status(&row.status)?,
            studio_types: row.studio_types.into_iter().map(StudioType::from).collect(),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl StudioRepository for PostgresStudioRepository {
    async fn find_by_id(&self, id: &StudioId) -> Result<Option<StudioListing>, DomainError> {
        let row: Option<StudioRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, status, studio_types, updated_at
            FROM studios
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find studio", e))?;

        row.map(StudioListing::try_from).transpose()
    }

    async fn update_studio_types(&self, listing: &StudioListing) -> Result<(), DomainError> {
        let types: Vec<String> = listing
            .studio_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE studios SET
                studio_types = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(listing.id.as_uuid())
        .bind(types)
        .bind(listing.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update studio types", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::StudioNotFound, "Studio not found"));
        }

        Ok(())
    }
}

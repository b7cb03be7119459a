//! PostgreSQL implementation of the enforcement ports.
//!
//! Candidates are loaded in a single query with the owner's latest
//! subscription joined laterally. Writes are one `UPDATE ... WHERE id = ANY($1)`
//! per field. Each statement re-checks the current value and the expiry
//! condition, so reruns change nothing and a listing renewed or re-featured
//! after the snapshot was taken is left alone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, StudioId, Timestamp};
use crate::domain::membership::SubscriptionWindow;
use crate::domain::studio::StudioProjection;
use crate::ports::{StudioEnforcementWriter, StudioProjectionReader};

use super::rows::{parse_studio_status, SubscriptionRow};

/// PostgreSQL implementation of the enforcement reader and writer ports.
pub struct PostgresStudioEnforcement {
    pool: PgPool,
}

impl PostgresStudioEnforcement {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for the enforcement candidate query.
#[derive(Debug, sqlx::FromRow)]
struct ProjectionRow {
    id: Uuid,
    status: String,
    is_featured: bool,
    featured_until: Option<DateTime<Utc>>,
    subscription_id: Option<Uuid>,
    subscription_user_id: Option<Uuid>,
    subscription_status: Option<String>,
    current_period_start: Option<DateTime<Utc>>,
    current_period_end: Option<DateTime<Utc>>,
    subscription_created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProjectionRow> for StudioProjection {
    type Error = DomainError;

    fn try_from(row: ProjectionRow) -> Result<Self, Self::Error> {
        let latest_subscription = match (
            row.subscription_id,
            row.subscription_user_id,
            row.subscription_status,
            row.subscription_created_at,
        ) {
            (Some(id), Some(user_id), Some(status), Some(created_at)) => {
                Some(SubscriptionWindow::try_from(SubscriptionRow {
                    id,
                    user_id,
                    status,
                    current_period_start: row.current_period_start,
                    current_period_end: row.current_period_end,
                    created_at,
                })?)
            }
            _ => None,
        };

        Ok(StudioProjection {
            id: StudioId::from_uuid(row.id),
            status: parse_studio_status(&row.status)?,
            is_featured: row.is_featured,
            featured_until: row.featured_until.map(Timestamp::from_datetime),
            latest_subscription,
        })
    }
}

fn to_uuids(ids: &[StudioId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl StudioProjectionReader for PostgresStudioEnforcement {
    async fn load_enforcement_candidates(&self) -> Result<Vec<StudioProjection>, DomainError> {
        let rows: Vec<ProjectionRow> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.status,
                s.is_featured,
                s.featured_until,
                sub.id AS subscription_id,
                sub.user_id AS subscription_user_id,
                sub.status AS subscription_status,
                sub.current_period_start,
                sub.current_period_end,
                sub.created_at AS subscription_created_at
            FROM studios s
            LEFT JOIN LATERAL (
                SELECT id, user_id, status, current_period_start, current_period_end, created_at
                FROM subscriptions
                WHERE user_id = s.owner_id
                ORDER BY created_at DESC
                LIMIT 1
            ) sub ON TRUE
            WHERE s.status = 'ACTIVE' OR s.is_featured
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load enforcement candidates", e))?;

        rows.into_iter().map(StudioProjection::try_from).collect()
    }
}

#[async_trait]
impl StudioEnforcementWriter for PostgresStudioEnforcement {
    async fn deactivate_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE studios SET
                status = 'INACTIVE',
                updated_at = NOW()
            WHERE id = ANY($1)
              AND status = 'ACTIVE'
              AND NOT COALESCE((
                  SELECT sub.current_period_end >= NOW()
                  FROM subscriptions sub
                  WHERE sub.user_id = studios.owner_id
                  ORDER BY sub.created_at DESC
                  LIMIT 1
              ), FALSE)
            "#,
        )
        .bind(to_uuids(ids))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to deactivate studios", e))?;

        Ok(result.rows_affected())
    }

    async fn unfeature_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE studios SET
                is_featured = FALSE,
                featured_until = NULL,
                updated_at = NOW()
            WHERE id = ANY($1)
              AND is_featured
              AND (
                  featured_until < NOW()
                  OR NOT COALESCE((
                      SELECT sub.current_period_end >= NOW()
                      FROM subscriptions sub
                      WHERE sub.user_id = studios.owner_id
                      ORDER BY sub.created_at DESC
                      LIMIT 1
                  ), FALSE)
              )
            "#,
        )
        .bind(to_uuids(ids))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to unfeature studios", e))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::studio::StudioStatus;

    fn row() -> ProjectionRow {
        ProjectionRow {
            id: Uuid::new_v4(),
            status: "ACTIVE".to_string(),
            is_featured: true,
            featured_until: None,
            subscription_id: None,
            subscription_user_id: None,
            subscription_status: None,
            current_period_start: None,
            current_period_end: None,
            subscription_created_at: None,
        }
    }

    #[test]
    fn row_without_subscription_has_no_window() {
        let projection = StudioProjection::try_from(row()).unwrap();
        assert_eq!(projection.status, StudioStatus::Active);
        assert!(projection.latest_subscription.is_none());
    }

    #[test]
    fn row_with_subscription_keeps_missing_end() {
        let now = Utc::now();
        let projection = StudioProjection::try_from(ProjectionRow {
            subscription_id: Some(Uuid::new_v4()),
            subscription_user_id: Some(Uuid::new_v4()),
            subscription_status: Some("EXPIRED".to_string()),
            subscription_created_at: Some(now),
            ..row()
        })
        .unwrap();

        let window = projection.latest_subscription.unwrap();
        assert!(window.current_period_end.is_none());
        assert!(window.is_expired_at(&Timestamp::from_datetime(now)));
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let result = StudioProjection::try_from(ProjectionRow {
            status: "PENDING".to_string(),
            ..row()
        });
        assert!(result.is_err());
    }

    #[test]
    fn ids_convert_in_order() {
        let ids = vec![StudioId::new(), StudioId::new()];
        let uuids = to_uuids(&ids);
        assert_eq!(uuids, vec![*ids[0].as_uuid(), *ids[1].as_uuid()]);
    }
}

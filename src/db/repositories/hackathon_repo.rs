//! Hackathon repository

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Hackathon};

/// Columns of a new hackathon
#[derive(Debug, Clone)]
pub struct NewHackathon<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub description: Option<&'a str>,
    pub status: i32,
    pub basic_info: &'a Value,
    pub extra_info: &'a Value,
    pub event_start_time: Option<DateTime<Utc>>,
    pub event_end_time: Option<DateTime<Utc>>,
    pub creator_id: &'a Uuid,
}

/// Columns to overwrite on an existing hackathon (`None` keeps the stored value)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HackathonChanges {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
    pub basic_info: Option<Value>,
    pub extra_info: Option<Value>,
    pub event_start_time: Option<DateTime<Utc>>,
    pub event_end_time: Option<DateTime<Utc>>,
}

impl HackathonChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Repository for hackathon database operations
pub struct HackathonRepository;

impl HackathonRepository {
    /// Insert a hackathon
    pub async fn create<'e, E>(executor: E, new: NewHackathon<'_>) -> AppResult<Hackathon>
    where
        E: PgExecutor<'e>,
    {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            INSERT INTO hackathons (
                name, display_name, description, status, basic_info, extra_info,
                event_start_time, event_end_time, creator_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.name)
        .bind(new.display_name)
        .bind(new.description)
        .bind(new.status)
        .bind(new.basic_info)
        .bind(new.extra_info)
        .bind(new.event_start_time)
        .bind(new.event_end_time)
        .bind(new.creator_id)
        .fetch_one(executor)
        .await?;

        Ok(hackathon)
    }

    /// Find hackathon by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Hackathon>> {
        let hackathon = sqlx::query_as::<_, Hackathon>(r#"SELECT * FROM hackathons WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(hackathon)
    }

    /// Find hackathon by its unique name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> AppResult<Option<Hackathon>> {
        let hackathon =
            sqlx::query_as::<_, Hackathon>(r#"SELECT * FROM hackathons WHERE name = $1"#)
                .bind(name)
                .fetch_optional(pool)
                .await?;

        Ok(hackathon)
    }

    /// List hackathons, optionally restricted to one status
    pub async fn list(pool: &PgPool, status: Option<i32>) -> AppResult<Vec<Hackathon>> {
        let hackathons = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT * FROM hackathons
            WHERE ($1::int IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(hackathons)
    }

    /// List hackathons by ID
    pub async fn list_by_ids(pool: &PgPool, ids: &[Uuid]) -> AppResult<Vec<Hackathon>> {
        let hackathons = sqlx::query_as::<_, Hackathon>(
            r#"SELECT * FROM hackathons WHERE id = ANY($1) ORDER BY created_at DESC"#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(hackathons)
    }

    /// List hackathons a user holds a live registration for
    pub async fn list_registered_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Hackathon>> {
        let hackathons = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT h.* FROM hackathons h
            JOIN user_hackathon_rels r ON r.hackathon_id = h.id
            WHERE r.user_id = $1 AND NOT r.deleted
            ORDER BY h.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(hackathons)
    }

    /// Apply changes and refresh `updated_at`
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        changes: &HackathonChanges,
    ) -> AppResult<Hackathon> {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            UPDATE hackathons
            SET
                display_name = COALESCE($2, display_name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                basic_info = COALESCE($5, basic_info),
                extra_info = COALESCE($6, extra_info),
                event_start_time = COALESCE($7, event_start_time),
                event_end_time = COALESCE($8, event_end_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.display_name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.status)
        .bind(changes.basic_info.as_ref())
        .bind(changes.extra_info.as_ref())
        .bind(changes.event_start_time)
        .bind(changes.event_end_time)
        .fetch_one(pool)
        .await?;

        Ok(hackathon)
    }

    /// Count accepted registrations and how many of those users are online
    pub async fn registration_stat(
        pool: &PgPool,
        hackathon_id: &Uuid,
        accepted_statuses: &[i32],
    ) -> AppResult<(i64, i64)> {
        let (total, online): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE u.online)
            FROM user_hackathon_rels r
            JOIN users u ON u.id = r.user_id
            WHERE r.hackathon_id = $1
              AND NOT r.deleted
              AND r.status = ANY($2)
            "#,
        )
        .bind(hackathon_id)
        .bind(accepted_statuses)
        .fetch_one(pool)
        .await?;

        Ok((total, online))
    }
}

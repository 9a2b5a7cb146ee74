//! Admin relation repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::AdminHackathonRel};

/// Repository for admin-hackathon relations
pub struct AdminRepository;

impl AdminRepository {
    /// Insert an admin relation
    pub async fn create<'e, E>(
        executor: E,
        user_id: &Uuid,
        hackathon_id: Option<&Uuid>,
        role_type: i32,
        status: i32,
        remarks: Option<&str>,
    ) -> AppResult<AdminHackathonRel>
    where
        E: PgExecutor<'e>,
    {
        let rel = sqlx::query_as::<_, AdminHackathonRel>(
            r#"
            INSERT INTO admin_hackathon_rels (user_id, hackathon_id, role_type, status, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .bind(role_type)
        .bind(status)
        .bind(remarks)
        .fetch_one(executor)
        .await?;

        Ok(rel)
    }

    /// All admin relations held by a user
    pub async fn list_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<AdminHackathonRel>> {
        let rels = sqlx::query_as::<_, AdminHackathonRel>(
            r#"SELECT * FROM admin_hackathon_rels WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rels)
    }

    /// Admin relations scoped to one hackathon
    pub async fn list_by_hackathon(
        pool: &PgPool,
        hackathon_id: &Uuid,
    ) -> AppResult<Vec<AdminHackathonRel>> {
        let rels = sqlx::query_as::<_, AdminHackathonRel>(
            r#"
            SELECT * FROM admin_hackathon_rels
            WHERE hackathon_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(pool)
        .await?;

        Ok(rels)
    }

    /// Find an admin relation by ID within a hackathon
    pub async fn find_in_hackathon(
        pool: &PgPool,
        hackathon_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<AdminHackathonRel>> {
        let rel = sqlx::query_as::<_, AdminHackathonRel>(
            r#"SELECT * FROM admin_hackathon_rels WHERE id = $1 AND hackathon_id = $2"#,
        )
        .bind(id)
        .bind(hackathon_id)
        .fetch_optional(pool)
        .await?;

        Ok(rel)
    }

    /// Count admin relations of a hackathon
    pub async fn count_by_hackathon(pool: &PgPool, hackathon_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM admin_hackathon_rels WHERE hackathon_id = $1"#,
        )
        .bind(hackathon_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Delete an admin relation
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM admin_hackathon_rels WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

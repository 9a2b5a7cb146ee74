//! Registration repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::UserHackathonRel,
};

/// Contact details supplied with a registration
#[derive(Debug, Clone, Default)]
pub struct RegistrationDetails<'a> {
    pub real_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Repository for user-hackathon relations
pub struct RegistrationRepository;

impl RegistrationRepository {
    /// Insert a registration, reviving a soft-deleted one for the same pair
    pub async fn upsert(
        pool: &PgPool,
        user_id: &Uuid,
        hackathon_id: &Uuid,
        details: RegistrationDetails<'_>,
        status: i32,
    ) -> AppResult<UserHackathonRel> {
        let rel = sqlx::query_as::<_, UserHackathonRel>(
            r#"
            INSERT INTO user_hackathon_rels (user_id, hackathon_id, real_name, email, phone, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, hackathon_id) DO UPDATE
            SET
                real_name = EXCLUDED.real_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                status = EXCLUDED.status,
                deleted = FALSE,
                updated_at = NOW()
            WHERE user_hackathon_rels.deleted
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(hackathon_id)
        .bind(details.real_name)
        .bind(details.email)
        .bind(details.phone)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        // No row back means a live registration already exists
        rel.ok_or_else(|| AppError::AlreadyExists("Already registered for this hackathon".to_string()))
    }

    /// Find a registration by ID within a hackathon
    pub async fn find_in_hackathon(
        pool: &PgPool,
        hackathon_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<UserHackathonRel>> {
        let rel = sqlx::query_as::<_, UserHackathonRel>(
            r#"SELECT * FROM user_hackathon_rels WHERE id = $1 AND hackathon_id = $2"#,
        )
        .bind(id)
        .bind(hackathon_id)
        .fetch_optional(pool)
        .await?;

        Ok(rel)
    }

    /// Live registrations of a user
    pub async fn list_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<UserHackathonRel>> {
        let rels = sqlx::query_as::<_, UserHackathonRel>(
            r#"SELECT * FROM user_hackathon_rels WHERE user_id = $1 AND NOT deleted"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rels)
    }

    /// Live registrations of a hackathon
    pub async fn list_by_hackathon(
        pool: &PgPool,
        hackathon_id: &Uuid,
    ) -> AppResult<Vec<UserHackathonRel>> {
        let rels = sqlx::query_as::<_, UserHackathonRel>(
            r#"
            SELECT * FROM user_hackathon_rels
            WHERE hackathon_id = $1 AND NOT deleted
            ORDER BY created_at
            "#,
        )
        .bind(hackathon_id)
        .fetch_all(pool)
        .await?;

        Ok(rels)
    }

    /// Set the audit status of a registration
    pub async fn update_status(pool: &PgPool, id: &Uuid, status: i32) -> AppResult<UserHackathonRel> {
        let rel = sqlx::query_as::<_, UserHackathonRel>(
            r#"
            UPDATE user_hackathon_rels
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(rel)
    }

    /// Soft-delete a registration
    pub async fn mark_deleted(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE user_hackathon_rels SET deleted = TRUE, updated_at = NOW() WHERE id = $1"#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }
}

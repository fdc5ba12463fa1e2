//! Repository for the `clubs` table.

use clubdir_core::club::ClubFields;
use clubdir_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::club::{Club, UpdateClub};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, college_name, club_name, brief_description, club_advisor, \
                        meeting_schedule, meeting_location, meeting_time, website, \
                        contact_email, phone_number, social_media_links, created_at, updated_at";

const INSERT: &str = "INSERT INTO clubs (college_name, club_name, brief_description, club_advisor, \
                       meeting_schedule, meeting_location, meeting_time, website, \
                       contact_email, phone_number, social_media_links)
                      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)";

/// Provides CRUD operations for clubs.
pub struct ClubRepo;

impl ClubRepo {
    /// Insert a new club, returning the created row.
    pub async fn create(pool: &PgPool, input: &ClubFields) -> Result<Club, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_on(&mut *conn, input).await
    }

    /// Insert a new club on an existing connection or transaction.
    pub async fn create_on(
        conn: &mut PgConnection,
        input: &ClubFields,
    ) -> Result<Club, sqlx::Error> {
        let query = format!("{INSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, Club>(&query)
            .bind(&input.college_name)
            .bind(&input.club_name)
            .bind(&input.brief_description)
            .bind(&input.club_advisor)
            .bind(&input.meeting_schedule)
            .bind(&input.meeting_location)
            .bind(&input.meeting_time)
            .bind(&input.website)
            .bind(&input.contact_email)
            .bind(&input.phone_number)
            .bind(&input.social_media_links)
            .fetch_one(conn)
            .await
    }

    /// Find a club by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs WHERE id = $1");
        sqlx::query_as::<_, Club>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest club whose college and club names match exactly.
    pub async fn find_by_natural_key(
        pool: &PgPool,
        college_name: &str,
        club_name: &str,
    ) -> Result<Option<Club>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clubs
             WHERE college_name = $1 AND club_name = $2
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(college_name)
            .bind(club_name)
            .fetch_optional(pool)
            .await
    }

    /// List every club in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs ORDER BY id");
        sqlx::query_as::<_, Club>(&query).fetch_all(pool).await
    }

    /// Update a club. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClub,
    ) -> Result<Option<Club>, sqlx::Error> {
        let query = format!(
            "UPDATE clubs SET
                college_name = COALESCE($2, college_name),
                club_name = COALESCE($3, club_name),
                brief_description = COALESCE($4, brief_description),
                club_advisor = COALESCE($5, club_advisor),
                meeting_schedule = COALESCE($6, meeting_schedule),
                meeting_location = COALESCE($7, meeting_location),
                meeting_time = COALESCE($8, meeting_time),
                website = COALESCE($9, website),
                contact_email = COALESCE($10, contact_email),
                phone_number = COALESCE($11, phone_number),
                social_media_links = COALESCE($12, social_media_links)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(id)
            .bind(&input.college_name)
            .bind(&input.club_name)
            .bind(&input.brief_description)
            .bind(&input.club_advisor)
            .bind(&input.meeting_schedule)
            .bind(&input.meeting_location)
            .bind(&input.meeting_time)
            .bind(&input.website)
            .bind(&input.contact_email)
            .bind(&input.phone_number)
            .bind(&input.social_media_links)
            .fetch_optional(pool)
            .await
    }

    /// Delete a club by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Bookings repository for database operations
//!
//! The conflict-checked write paths run inside a transaction holding a
//! per-equipment advisory lock, so two concurrent requests for the same
//! slot cannot both pass the overlap check and commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingDetails, BookingQuery, BookingStatusChange, NewBooking,
        },
        equipment::BookingFlags,
    },
};

/// Data access required by the booking rules.
///
/// Injected into the booking service so the overlap/approval logic can be
/// exercised against a test double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Booking-relevant flags for a piece of equipment, `None` if unknown
    async fn equipment_flags(&self, equipment_id: Uuid) -> AppResult<Option<BookingFlags>>;

    /// Fetch a booking row by id
    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Fetch a booking joined with equipment/user names
    async fn booking_details(&self, id: Uuid) -> AppResult<Option<BookingDetails>>;

    /// List bookings matching the filter, excluding cancelled rows
    async fn list_bookings(&self, query: &BookingQuery) -> AppResult<Vec<BookingDetails>>;

    /// Insert a booking unless it overlaps an active one for the same
    /// equipment; returns `Conflict` otherwise
    async fn insert_checked(&self, booking: &NewBooking) -> AppResult<Booking>;

    /// Move a booking to a new interval unless the new interval overlaps
    /// an active booking other than itself
    async fn reschedule_checked(
        &self,
        id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        purpose: Option<String>,
    ) -> AppResult<Booking>;

    /// Apply a status change, stamping approval/cancellation fields
    async fn apply_status(&self, id: Uuid, change: &BookingStatusChange) -> AppResult<Booking>;

    /// Hard-delete a booking row
    async fn delete_booking(&self, id: Uuid) -> AppResult<()>;

    /// Confirmed bookings for the equipment intersecting `[start, end)`
    async fn confirmed_in_range(
        &self,
        equipment_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    /// Count bookings awaiting admin approval
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count confirmed bookings that have not started yet
    pub async fn count_upcoming_confirmed(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE status = 'confirmed' AND start_time > NOW()",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// SQL mirror of `models::booking::intervals_overlap`, restricted to the
/// active statuses for the same equipment.
async fn conflict_exists(
    conn: &mut PgConnection,
    equipment_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM bookings
            WHERE equipment_id = $1
              AND status IN ('pending', 'confirmed')
              AND start_time < $3
              AND end_time > $2
              AND ($4::uuid IS NULL OR id != $4)
        )
        "#,
    )
    .bind(equipment_id)
    .bind(start)
    .bind(end)
    .bind(exclude)
    .fetch_one(conn)
    .await
}

/// Serialize concurrent writers for one equipment within the transaction
async fn lock_equipment(conn: &mut PgConnection, equipment_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
        .bind(equipment_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn equipment_flags(&self, equipment_id: Uuid) -> AppResult<Option<BookingFlags>> {
        let flags = sqlx::query_as::<_, BookingFlags>(
            "SELECT is_bookable, status, requires_approval FROM equipment WHERE id = $1",
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flags)
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        self.find(id).await
    }

    async fn booking_details(&self, id: Uuid) -> AppResult<Option<BookingDetails>> {
        let details = sqlx::query_as::<_, BookingDetails>(
            r#"
            SELECT b.*, e.name AS equipment_name, e.location AS equipment_location,
                   u.full_name AS user_name, u.email AS user_email,
                   a.full_name AS approved_by_name
            FROM bookings b
            JOIN equipment e ON b.equipment_id = e.id
            JOIN users u ON b.user_id = u.id
            LEFT JOIN users a ON b.approved_by = a.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(details)
    }

    async fn list_bookings(&self, query: &BookingQuery) -> AppResult<Vec<BookingDetails>> {
        let mut conditions = vec!["b.status != 'cancelled'".to_string()];
        let mut idx = 0;

        macro_rules! add_filter {
            ($field:expr, $column:expr, $op:expr) => {
                if $field.is_some() {
                    idx += 1;
                    conditions.push(format!("{} {} ${}", $column, $op, idx));
                }
            };
        }

        add_filter!(query.equipment_id, "b.equipment_id", "=");
        add_filter!(query.user_id, "b.user_id", "=");
        add_filter!(query.status, "b.status", "=");
        add_filter!(query.start_date, "b.end_time", ">");
        add_filter!(query.end_date, "b.start_time", "<");

        let sql = format!(
            r#"
            SELECT b.*, e.name AS equipment_name, e.location AS equipment_location,
                   u.full_name AS user_name, u.email AS user_email,
                   a.full_name AS approved_by_name
            FROM bookings b
            JOIN equipment e ON b.equipment_id = e.id
            JOIN users u ON b.user_id = u.id
            LEFT JOIN users a ON b.approved_by = a.id
            WHERE {}
            ORDER BY b.start_time ASC
            "#,
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, BookingDetails>(&sql);
        if let Some(equipment_id) = query.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(user_id) = query.user_id {
            builder = builder.bind(user_id);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(start_date) = query.start_date {
            builder = builder.bind(start_date);
        }
        if let Some(end_date) = query.end_date {
            builder = builder.bind(end_date);
        }

        let bookings = builder.fetch_all(&self.pool).await?;
        Ok(bookings)
    }

    async fn insert_checked(&self, booking: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        lock_equipment(&mut tx, booking.equipment_id).await?;

        if conflict_exists(
            &mut tx,
            booking.equipment_id,
            booking.start_time,
            booking.end_time,
            None,
        )
        .await?
        {
            return Err(AppError::Conflict(
                "Time slot conflicts with existing booking".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (equipment_id, user_id, start_time, end_time, purpose, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(booking.equipment_id)
        .bind(booking.user_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(&booking.purpose)
        .bind(booking.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn reschedule_checked(
        &self,
        id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        purpose: Option<String>,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let equipment_id: Uuid =
            sqlx::query_scalar("SELECT equipment_id FROM bookings WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        lock_equipment(&mut tx, equipment_id).await?;

        if conflict_exists(&mut tx, equipment_id, start, end, Some(id)).await? {
            return Err(AppError::Conflict(
                "Time slot conflicts with existing booking".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET start_time = $2, end_time = $3, purpose = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start)
        .bind(end)
        .bind(&purpose)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn apply_status(&self, id: Uuid, change: &BookingStatusChange) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2,
                admin_notes = COALESCE($3, admin_notes),
                approved_by = CASE WHEN $4::uuid IS NOT NULL THEN $4 ELSE approved_by END,
                approved_at = CASE WHEN $4::uuid IS NOT NULL THEN NOW() ELSE approved_at END,
                cancelled_at = CASE WHEN $5 THEN NOW() ELSE cancelled_at END,
                cancellation_reason = COALESCE($6, cancellation_reason),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.status)
        .bind(&change.admin_notes)
        .bind(change.approved_by)
        .bind(change.stamp_cancelled)
        .bind(&change.cancellation_reason)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    async fn delete_booking(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }
        Ok(())
    }

    async fn confirmed_in_range(
        &self,
        equipment_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE equipment_id = $1
              AND status = 'confirmed'
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time ASC
            "#,
        )
        .bind(equipment_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }
}

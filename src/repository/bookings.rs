//! Bookings repository for database operations

use chrono::{Duration, NaiveDate};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{STATUS_CANCELLED, STATUS_CONFIRMED},
        Booking, ExistingBooking, NewBooking,
    },
    scheduling::conflict::conflicts_with,
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Occupancy windows of confirmed bookings on a date
    pub async fn existing_for_date(&self, salon_id: i32, date: NaiveDate) -> AppResult<Vec<ExistingBooking>> {
        let rows = sqlx::query_as::<_, ExistingBooking>(
            r#"
            SELECT start_time, duration_minutes
            FROM bookings
            WHERE salon_id = $1 AND booking_date = $2 AND status = $3
            ORDER BY start_time
            "#,
        )
        .bind(salon_id)
        .bind(date)
        .bind(STATUS_CONFIRMED)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Check-and-insert a booking.
    ///
    /// The salon row is locked for the duration of the transaction so that
    /// concurrent submissions for the same salon are serialized; the overlap
    /// check then sees every committed booking of the day.
    pub async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let salon: Option<i32> = sqlx::query_scalar("SELECT id FROM salons WHERE id = $1 FOR UPDATE")
            .bind(booking.salon_id)
            .fetch_optional(&mut *tx)
            .await?;
        if salon.is_none() {
            return Err(AppError::NotFound(format!("Salon {} not found", booking.salon_id)));
        }

        let existing = sqlx::query_as::<_, ExistingBooking>(
            r#"
            SELECT start_time, duration_minutes
            FROM bookings
            WHERE salon_id = $1 AND booking_date = $2 AND status = $3
            "#,
        )
        .bind(booking.salon_id)
        .bind(booking.date)
        .bind(STATUS_CONFIRMED)
        .fetch_all(&mut *tx)
        .await?;

        let duration = Duration::minutes(i64::from(booking.total_duration_minutes));
        if conflicts_with(booking.start_time, duration, &existing) {
            // Dropping the transaction rolls it back and releases the lock
            return Err(AppError::BookingConflict(format!(
                "Slot {} on {} is no longer available",
                booking.start_time.format("%H:%M"),
                booking.date
            )));
        }

        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (salon_id, customer_id, service_ids, booking_date, start_time,
                 duration_minutes, total_price, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(booking.salon_id)
        .bind(booking.customer_id)
        .bind(&booking.service_ids)
        .bind(booking.date)
        .bind(booking.start_time)
        .bind(booking.total_duration_minutes)
        .bind(booking.total_price)
        .bind(&booking.notes)
        .bind(STATUS_CONFIRMED)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// All bookings of a customer, newest first
    pub async fn list_for_customer(&self, customer_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE customer_id = $1 ORDER BY booking_date DESC, start_time DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Soft-cancel a confirmed booking owned by the customer
    pub async fn cancel(&self, id: i32, customer_id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $3
            WHERE id = $1 AND customer_id = $2 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(STATUS_CANCELLED)
        .bind(STATUS_CONFIRMED)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }
}

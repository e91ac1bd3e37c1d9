//! Salons repository (profile and service catalog)

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Salon, SalonService},
};

#[derive(Clone)]
pub struct SalonsRepository {
    pool: Pool<Postgres>,
}

impl SalonsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get salon by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Salon> {
        sqlx::query_as::<_, Salon>("SELECT * FROM salons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Salon {} not found", id)))
    }

    /// Service catalog of a salon, ordered by name
    pub async fn list_services(&self, salon_id: i32) -> AppResult<Vec<SalonService>> {
        let rows = sqlx::query_as::<_, SalonService>(
            r#"
            SELECT id, salon_id, name, price, duration_minutes
            FROM salon_services
            WHERE salon_id = $1 AND active
            ORDER BY name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One stored biometric snapshot, stamped with the score computed at write
/// time. `components` keeps the per-factor weighted breakdown as jsonb.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BodyParameters {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dietitian_id: Option<Uuid>,
    pub height: Option<String>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat: Option<f64>,
    pub trunk_fat: Option<f64>,
    pub subcutaneous_fat: Option<f64>,
    pub muscle: Option<f64>,
    pub visceral_fat: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<f64>,
    pub body_age: Option<f64>,
    pub hydration: Option<String>,
    pub score: f64,
    pub status: String,
    pub components: serde_json::Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, dietitian_id, height, weight, bmi, body_fat, trunk_fat, \
     subcutaneous_fat, muscle, visceral_fat, sleep_hours, sleep_quality, stress_level, \
     body_age, hydration, score, status, components, created_at, updated_at";

pub struct NewBodyParameters<'a> {
    pub user_id: Uuid,
    pub dietitian_id: Option<Uuid>,
    pub height: Option<&'a str>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat: Option<f64>,
    pub trunk_fat: Option<f64>,
    pub subcutaneous_fat: Option<f64>,
    pub muscle: Option<f64>,
    pub visceral_fat: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<&'a str>,
    pub stress_level: Option<f64>,
    pub body_age: Option<f64>,
    pub hydration: Option<&'a str>,
    pub score: f64,
    pub status: &'a str,
    pub components: serde_json::Value,
}

impl BodyParameters {
    pub async fn insert(db: &PgPool, new: NewBodyParameters<'_>) -> anyhow::Result<BodyParameters> {
        let row = sqlx::query_as::<_, BodyParameters>(&format!(
            r#"
            INSERT INTO body_parameters
                (user_id, dietitian_id, height, weight, bmi, body_fat, trunk_fat,
                 subcutaneous_fat, muscle, visceral_fat, sleep_hours, sleep_quality,
                 stress_level, body_age, hydration, score, status, components)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.dietitian_id)
        .bind(new.height)
        .bind(new.weight)
        .bind(new.bmi)
        .bind(new.body_fat)
        .bind(new.trunk_fat)
        .bind(new.subcutaneous_fat)
        .bind(new.muscle)
        .bind(new.visceral_fat)
        .bind(new.sleep_hours)
        .bind(new.sleep_quality)
        .bind(new.stress_level)
        .bind(new.body_age)
        .bind(new.hydration)
        .bind(new.score)
        .bind(new.status)
        .bind(new.components)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        new: NewBodyParameters<'_>,
    ) -> anyhow::Result<Option<BodyParameters>> {
        let row = sqlx::query_as::<_, BodyParameters>(&format!(
            r#"
            UPDATE body_parameters
            SET dietitian_id = $3, height = $4, weight = $5, bmi = $6, body_fat = $7,
                trunk_fat = $8, subcutaneous_fat = $9, muscle = $10, visceral_fat = $11,
                sleep_hours = $12, sleep_quality = $13, stress_level = $14, body_age = $15,
                hydration = $16, score = $17, status = $18, components = $19,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(new.dietitian_id)
        .bind(new.height)
        .bind(new.weight)
        .bind(new.bmi)
        .bind(new.body_fat)
        .bind(new.trunk_fat)
        .bind(new.subcutaneous_fat)
        .bind(new.muscle)
        .bind(new.visceral_fat)
        .bind(new.sleep_hours)
        .bind(new.sleep_quality)
        .bind(new.stress_level)
        .bind(new.body_age)
        .bind(new.hydration)
        .bind(new.score)
        .bind(new.status)
        .bind(new.components)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<BodyParameters>> {
        let rows = sqlx::query_as::<_, BodyParameters>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM body_parameters
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn delete(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM body_parameters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LabTest {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub price: f64,
    pub parameter_count: i32,
    pub special_instruction: String,
    pub created_at: OffsetDateTime,
}

/// Catalog seam the cart reconciler depends on. Carts hold references into
/// the catalog and must tolerate entries deleted behind their back.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_test(&self, id: Uuid) -> anyhow::Result<Option<LabTest>>;
}

pub struct PgCatalog {
    db: PgPool,
}

impl PgCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogLookup for PgCatalog {
    async fn get_test(&self, id: Uuid) -> anyhow::Result<Option<LabTest>> {
        let test = sqlx::query_as::<_, LabTest>(
            r#"
            SELECT id, name, code, price, parameter_count, special_instruction, created_at
            FROM lab_tests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(test)
    }
}

impl LabTest {
    pub async fn create(
        db: &PgPool,
        name: &str,
        code: Option<&str>,
        price: f64,
        parameter_count: i32,
        special_instruction: Option<&str>,
    ) -> anyhow::Result<LabTest> {
        let test = sqlx::query_as::<_, LabTest>(
            r#"
            INSERT INTO lab_tests (name, code, price, parameter_count, special_instruction)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'No special preparation required'))
            RETURNING id, name, code, price, parameter_count, special_instruction, created_at
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(price)
        .bind(parameter_count)
        .bind(special_instruction)
        .fetch_one(db)
        .await?;
        Ok(test)
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<LabTest>> {
        let rows = sqlx::query_as::<_, LabTest>(
            r#"
            SELECT id, name, code, price, parameter_count, special_instruction, created_at
            FROM lab_tests
            ORDER BY name ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

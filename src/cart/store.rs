use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{Cart, CartLine};

/// Cart persistence seam. A save writes the whole aggregate or nothing;
/// readers never observe lines and totals from different saves.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Cart>>;
    async fn save(&self, cart: &Cart) -> anyhow::Result<()>;
}

#[derive(Debug, FromRow)]
struct CartRow {
    user_id: Uuid,
    items: serde_json::Value,
    sub_total: f64,
    total: f64,
    net_payable: f64,
    created_at: OffsetDateTime,
}

pub struct PgCartStore {
    db: PgPool,
}

impl PgCartStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn load_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT user_id, items, sub_total, total, net_payable, created_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let lines: Vec<CartLine> = serde_json::from_value(row.items)?;
        Ok(Some(Cart {
            user_id: row.user_id,
            lines,
            sub_total: row.sub_total,
            total: row.total,
            net_payable: row.net_payable,
            created_at: row.created_at,
        }))
    }

    async fn save(&self, cart: &Cart) -> anyhow::Result<()> {
        // Single-row upsert: lines and totals land atomically or not at all.
        let items = serde_json::to_value(&cart.lines)?;
        sqlx::query(
            r#"
            INSERT INTO carts (user_id, items, sub_total, total, net_payable, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE
            SET items = EXCLUDED.items,
                sub_total = EXCLUDED.sub_total,
                total = EXCLUDED.total,
                net_payable = EXCLUDED.net_payable
            "#,
        )
        .bind(cart.user_id)
        .bind(items)
        .bind(cart.sub_total)
        .bind(cart.total)
        .bind(cart.net_payable)
        .bind(cart.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

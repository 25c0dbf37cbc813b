use sqlx::Postgres;
use uuid::Uuid;

use super::model::{NewProduct, Product, ProductChanges};
use crate::error::StoreError;

// Absent rows come back as NotFound, everything else as Database.
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Product, StoreError>;
    async fn insert(&self, product: &NewProduct) -> Result<Product, StoreError>;
    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<Product, StoreError>;
}

#[derive(Clone)]
pub struct ProductRepository {
    pub pool: sqlx::Pool<Postgres>,
}

impl ProductRepository {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl ProductStore for ProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(sqlx::query_as::<_, Product>(
            r#"SELECT id, name, emoji, old_price, new_price, discount, created_at
                FROM natal_tech_products
                ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Product, StoreError> {
        Ok(sqlx::query_as::<_, Product>(
            r#"SELECT id, name, emoji, old_price, new_price, discount, created_at
                FROM natal_tech_products
                WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, StoreError> {
        Ok(sqlx::query_as::<_, Product>(
            r#"INSERT INTO natal_tech_products (name, emoji, old_price, new_price, discount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, emoji, old_price, new_price, discount, created_at"#,
        )
        .bind(&product.name)
        .bind(&product.emoji)
        .bind(product.old_price)
        .bind(product.new_price)
        .bind(product.discount)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<Product, StoreError> {
        // Unprovided fields bind NULL and keep their stored value.
        Ok(sqlx::query_as::<_, Product>(
            r#"UPDATE natal_tech_products
                SET name = COALESCE($2, name),
                    emoji = COALESCE($3, emoji),
                    old_price = COALESCE($4, old_price),
                    new_price = COALESCE($5, new_price),
                    discount = COALESCE($6, discount)
                WHERE id = $1
                RETURNING id, name, emoji, old_price, new_price, discount, created_at"#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.emoji)
        .bind(changes.old_price)
        .bind(changes.new_price)
        .bind(changes.discount)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<Product, StoreError> {
        Ok(sqlx::query_as::<_, Product>(
            r#"DELETE FROM natal_tech_products
                WHERE id = $1
                RETURNING id, name, emoji, old_price, new_price, discount, created_at"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }
}

//! PostgreSQL 仓储实现

use async_trait::async_trait;
use errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::{NewProduct, Product};
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::ProductId;

use super::rows::ProductRow;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> AppResult<ProductId> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO products (name, description, image, price, sold, link_for_sale)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price)
        .bind(product.sold)
        .bind(&product.link_for_sale)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(ProductId(id))
    }

    async fn list_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, image, price, sold, link_for_sale
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, image, price, sold, link_for_sale
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $1,
                description = $2,
                image = $3,
                price = $4,
                sold = $5,
                link_for_sale = $6
            WHERE id = $7
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price)
        .bind(product.sold)
        .bind(&product.link_for_sale)
        .bind(product.id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Product {} not found",
                product.id
            )));
        }

        Ok(())
    }
}

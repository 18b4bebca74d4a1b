//! 数据库行类型

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductId;

/// products 表的一行
#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub price: f64,
    pub sold: f64,
    pub link_for_sale: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId(row.id),
            name: row.name,
            description: row.description,
            image: row.image,
            price: row.price,
            sold: row.sold,
            link_for_sale: row.link_for_sale,
        }
    }
}

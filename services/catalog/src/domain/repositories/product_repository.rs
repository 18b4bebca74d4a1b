//! 商品仓储接口

use async_trait::async_trait;
use errors::AppResult;

use crate::domain::entities::{NewProduct, Product};
use crate::domain::value_objects::ProductId;

/// 商品仓储接口
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 插入新商品，返回分配的 ID
    async fn insert(&self, product: NewProduct) -> AppResult<ProductId>;

    /// 返回全部商品
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    /// 按 ID 查找商品
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 按 ID 覆盖商品的全部可变列
    ///
    /// 没有匹配行时返回 `NotFound`
    async fn update(&self, product: &Product) -> AppResult<()>;
}

//! 请求 / 响应类型
//!
//! 线上 JSON 字段沿用 `linkForSale` 这一历史键名

use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewProduct, Product};
use crate::domain::value_objects::ProductId;

/// 创建商品请求
///
/// 必填字段缺失或类型不符在反序列化时直接拒绝
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub price: f64,
    pub sold: f64,
    #[serde(rename = "linkForSale")]
    pub link_for_sale: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            image: req.image,
            price: req.price,
            sold: req.sold,
            link_for_sale: req.link_for_sale,
        }
    }
}

/// 单个商品的响应表示
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub price: f64,
    pub sold: f64,
    #[serde(rename = "linkForSale")]
    pub link_for_sale: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image: product.image,
            price: product.price,
            sold: product.sold,
            link_for_sale: product.link_for_sale,
        }
    }
}

/// 商品列表响应
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

/// 创建成功响应，附带分配的 ID
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub id: ProductId,
}

/// 操作成功响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

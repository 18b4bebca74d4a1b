//! 商品实体

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::ProductId;

/// 商品实体，对应 products 表的一行
///
/// `name`、`image`、`price`、`sold` 在创建时必填；
/// `description` 和 `link_for_sale` 可空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub price: f64,
    pub sold: f64,
    pub link_for_sale: Option<String>,
}

impl Product {
    /// 应用合并更新：只覆盖请求中出现的字段
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(sold) = patch.sold {
            self.sold = sold;
        }
        if let Some(link_for_sale) = patch.link_for_sale {
            self.link_for_sale = link_for_sale;
        }
    }
}

/// 新建商品的数据，id 由存储层分配
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub price: f64,
    pub sold: f64,
    pub link_for_sale: Option<String>,
}

/// 商品合并更新
///
/// 外层 `None` 表示字段未出现、保持原值；可空字段用双层 `Option`
/// 区分「未出现」和「显式置空」
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub sold: Option<f64>,
    #[serde(
        rename = "linkForSale",
        default,
        deserialize_with = "present_or_null"
    )]
    pub link_for_sale: Option<Option<String>>,
}

impl ProductPatch {
    /// 是否不包含任何字段
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.price.is_none()
            && self.sold.is_none()
            && self.link_for_sale.is_none()
    }
}

/// 字段出现即 `Some`，其值为 null 时为 `Some(None)`
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

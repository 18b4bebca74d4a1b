//! catalog - 商品目录服务
//!
//! 针对 products 表的 HTTP CRUD 服务

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;

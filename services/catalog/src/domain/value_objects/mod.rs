//! 值对象

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 商品 ID，由数据库自增主键分配
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ProductId(pub i32);

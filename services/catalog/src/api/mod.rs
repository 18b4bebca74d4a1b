//! HTTP API 层

mod dto;
mod extract;
mod handlers;
mod routes;

use std::sync::Arc;

use crate::domain::ProductRepository;

pub use routes::{app, cors_layer};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

//! API 路由

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;

/// 构建服务路由
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route(
            "/product",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/product/{id}",
            get(handlers::get_product).patch(handlers::update_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 依据配置构建 CORS 层，禁用时返回 `None`
pub fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_disabled() {
        let config = CorsConfig {
            enabled: false,
            allowed_origins: vec!["*".to_string()],
        };
        assert!(cors_layer(&config).is_none());
    }

    #[test]
    fn test_cors_wildcard_and_explicit_origins() {
        let wildcard = CorsConfig {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        };
        assert!(cors_layer(&wildcard).is_some());

        let explicit = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://shop.example.com".to_string()],
        };
        assert!(cors_layer(&explicit).is_some());
    }
}

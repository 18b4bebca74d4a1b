//! 商品仓储集成测试

use adapter_postgres::MigrationManager;
use errors::AppError;
use sqlx::PgPool;

use catalog::domain::entities::{NewProduct, Product, ProductPatch};
use catalog::domain::repositories::ProductRepository;
use catalog::domain::value_objects::ProductId;
use catalog::infrastructure::persistence::{PostgresProductRepository, migrations};

async fn setup(pool: PgPool) -> PostgresProductRepository {
    MigrationManager::new(pool.clone())
        .migrate(&migrations())
        .await
        .expect("Failed to run migrations");
    PostgresProductRepository::new(pool)
}

fn widget() -> NewProduct {
    NewProduct {
        name: "Widget".to_string(),
        description: Some("A widget".to_string()),
        image: "http://x/im.png".to_string(),
        price: 10.5,
        sold: 0.0,
        link_for_sale: Some("http://x/buy".to_string()),
    }
}

#[sqlx::test]
async fn test_insert_and_find_by_id(pool: PgPool) {
    let repo = setup(pool).await;

    let id = repo.insert(widget()).await.unwrap();
    assert!(id.0 >= 1);

    let found = repo.find_by_id(id).await.unwrap();
    assert!(found.is_some(), "Product not found after insert");

    let product = found.unwrap();
    assert_eq!(product.id, id);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description.as_deref(), Some("A widget"));
    assert_eq!(product.image, "http://x/im.png");
    assert_eq!(product.price, 10.5);
    assert_eq!(product.sold, 0.0);
    assert_eq!(product.link_for_sale.as_deref(), Some("http://x/buy"));
}

#[sqlx::test]
async fn test_insert_assigns_unique_ids(pool: PgPool) {
    let repo = setup(pool).await;

    let first = repo.insert(widget()).await.unwrap();
    let second = repo.insert(widget()).await.unwrap();

    assert_ne!(first, second);
}

#[sqlx::test]
async fn test_nullable_fields_roundtrip_as_none(pool: PgPool) {
    let repo = setup(pool).await;

    let id = repo
        .insert(NewProduct {
            description: None,
            link_for_sale: None,
            ..widget()
        })
        .await
        .unwrap();

    let product = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(product.description, None);
    assert_eq!(product.link_for_sale, None);
}

#[sqlx::test]
async fn test_find_by_id_missing_returns_none(pool: PgPool) {
    let repo = setup(pool).await;

    let found = repo.find_by_id(ProductId(4242)).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test]
async fn test_list_all_returns_every_record(pool: PgPool) {
    let repo = setup(pool).await;

    assert!(repo.list_all().await.unwrap().is_empty());

    let first = repo.insert(widget()).await.unwrap();
    let second = repo
        .insert(NewProduct {
            name: "Gadget".to_string(),
            ..widget()
        })
        .await
        .unwrap();

    let products = repo.list_all().await.unwrap();
    assert_eq!(products.len(), 2);

    let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
}

#[sqlx::test]
async fn test_update_missing_returns_not_found(pool: PgPool) {
    let repo = setup(pool).await;

    let ghost = Product {
        id: ProductId(4242),
        name: "Ghost".to_string(),
        description: None,
        image: "http://x/ghost.png".to_string(),
        price: 1.0,
        sold: 0.0,
        link_for_sale: None,
    };

    let err = repo.update(&ghost).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn test_update_persists_merged_patch(pool: PgPool) {
    let repo = setup(pool).await;

    let id = repo.insert(widget()).await.unwrap();
    let mut product = repo.find_by_id(id).await.unwrap().unwrap();

    product.apply(ProductPatch {
        price: Some(9.99),
        ..Default::default()
    });
    repo.update(&product).await.unwrap();

    let reloaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.price, 9.99);
    assert_eq!(reloaded.name, "Widget");
    assert_eq!(reloaded.description.as_deref(), Some("A widget"));
    assert_eq!(reloaded.link_for_sale.as_deref(), Some("http://x/buy"));
}

#[sqlx::test]
async fn test_update_clears_nullable_field(pool: PgPool) {
    let repo = setup(pool).await;

    let id = repo.insert(widget()).await.unwrap();
    let mut product = repo.find_by_id(id).await.unwrap().unwrap();

    product.apply(ProductPatch {
        description: Some(None),
        ..Default::default()
    });
    repo.update(&product).await.unwrap();

    let reloaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.description, None);
    assert_eq!(reloaded.link_for_sale.as_deref(), Some("http://x/buy"));
}

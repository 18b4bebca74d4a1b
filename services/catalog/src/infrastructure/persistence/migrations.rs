//! 服务的数据库迁移

use adapter_postgres::Migration;

/// 全部迁移，按版本号排列
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_products",
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                description VARCHAR(150),
                image VARCHAR(200) NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                sold DOUBLE PRECISION NOT NULL,
                link_for_sale VARCHAR(200)
            )
            "#,
        )
        .with_down("DROP TABLE products"),
    ]
}

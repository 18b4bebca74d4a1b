//! PostgreSQL 迁移管理
//!
//! 服务启动时按版本号应用迁移，记录写入 `_migrations` 表

use errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::{info, warn};

/// 迁移记录
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    pub down_sql: Option<String>,
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = Self::calculate_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            down_sql: None,
            checksum,
        }
    }

    /// 设置降级 SQL
    pub fn with_down(mut self, down_sql: impl Into<String>) -> Self {
        self.down_sql = Some(down_sql.into());
        self
    }

    fn calculate_checksum(sql: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        sql.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

/// 迁移管理器
pub struct MigrationManager {
    pool: PgPool,
    table_name: String,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: "_migrations".to_string(),
        }
    }

    /// 设置迁移表名
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// 初始化迁移表
    pub async fn init(&self) -> AppResult<()> {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )
            "#,
            self.table_name
        );

        sqlx::query(&create_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        Ok(())
    }

    /// 获取已应用的迁移
    pub async fn applied_migrations(&self) -> AppResult<Vec<MigrationRecord>> {
        let sql = format!(
            "SELECT version, name, applied_at, checksum FROM {} ORDER BY version ASC",
            self.table_name
        );

        let records = sqlx::query_as::<_, MigrationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get migrations: {}", e)))?;

        Ok(records)
    }

    /// 应用单个迁移（迁移 SQL 和记录写入同一事务）
    pub async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {}: {}",
                    migration.version, e
                ))
            })?;

        let insert_sql = format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
            self.table_name
        );
        sqlx::query(&insert_sql)
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            name = %migration.name,
            "Migration applied"
        );

        Ok(())
    }

    /// 回滚单个迁移
    pub async fn rollback(&self, migration: &Migration) -> AppResult<()> {
        let down_sql = migration.down_sql.as_ref().ok_or_else(|| {
            AppError::internal(format!(
                "Migration {} does not have down SQL",
                migration.version
            ))
        })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(down_sql).execute(&mut *tx).await.map_err(|e| {
            AppError::database(format!(
                "Failed to rollback migration {}: {}",
                migration.version, e
            ))
        })?;

        let delete_sql = format!("DELETE FROM {} WHERE version = $1", self.table_name);
        sqlx::query(&delete_sql)
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete migration record: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit rollback: {}", e)))?;

        info!(
            version = migration.version,
            name = %migration.name,
            "Migration rolled back"
        );

        Ok(())
    }

    /// 应用所有待处理的迁移，返回本次应用的数量
    ///
    /// 已应用的版本会校验 checksum，不一致时立即报错
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<u32> {
        self.init().await?;

        let applied = self.applied_migrations().await?;
        let mut sorted: Vec<&Migration> = migrations.iter().collect();
        sorted.sort_by_key(|m| m.version);

        let mut applied_count = 0;
        for migration in sorted {
            if let Some(record) = applied.iter().find(|r| r.version == migration.version) {
                if record.checksum != migration.checksum {
                    return Err(AppError::internal(format!(
                        "Migration {} checksum mismatch: migration has been modified after being applied",
                        migration.version
                    )));
                }
                warn!(
                    version = migration.version,
                    name = %migration.name,
                    "Migration already applied, skipping"
                );
                continue;
            }

            self.apply(migration).await?;
            applied_count += 1;
        }

        Ok(applied_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration =
            Migration::new(1, "create_users", "CREATE TABLE users (id SERIAL PRIMARY KEY)")
                .with_down("DROP TABLE users");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.name, "create_users");
        assert!(migration.down_sql.is_some());
        assert!(!migration.checksum.is_empty());
    }

    #[test]
    fn test_checksum_consistency() {
        let sql = "CREATE TABLE test (id INT)";
        let m1 = Migration::new(1, "test", sql);
        let m2 = Migration::new(1, "test", sql);

        assert_eq!(m1.checksum, m2.checksum);
    }

    #[test]
    fn test_checksum_difference() {
        let m1 = Migration::new(1, "test", "CREATE TABLE test1 (id INT)");
        let m2 = Migration::new(1, "test", "CREATE TABLE test2 (id INT)");

        assert_ne!(m1.checksum, m2.checksum);
    }

    #[sqlx::test]
    async fn test_migrate_applies_and_skips(pool: sqlx::PgPool) {
        let manager = MigrationManager::new(pool.clone());
        let migrations = vec![
            Migration::new(1, "create_things", "CREATE TABLE things (id SERIAL PRIMARY KEY)")
                .with_down("DROP TABLE things"),
        ];

        let applied = manager.migrate(&migrations).await.unwrap();
        assert_eq!(applied, 1);

        // 第二次运行应跳过
        let applied = manager.migrate(&migrations).await.unwrap();
        assert_eq!(applied, 0);

        let records = manager.applied_migrations().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, 1);
        assert_eq!(records[0].name, "create_things");
    }

    #[sqlx::test]
    async fn test_migrate_rejects_modified_migration(pool: sqlx::PgPool) {
        let manager = MigrationManager::new(pool.clone());

        let v1 = vec![Migration::new(1, "create_things", "CREATE TABLE things (id INT)")];
        manager.migrate(&v1).await.unwrap();

        let modified = vec![Migration::new(1, "create_things", "CREATE TABLE things (id BIGINT)")];
        let err = manager.migrate(&modified).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[sqlx::test]
    async fn test_rollback_removes_record(pool: sqlx::PgPool) {
        let manager = MigrationManager::new(pool.clone());
        let migration =
            Migration::new(1, "create_things", "CREATE TABLE things (id SERIAL PRIMARY KEY)")
                .with_down("DROP TABLE things");

        manager.migrate(std::slice::from_ref(&migration)).await.unwrap();
        manager.rollback(&migration).await.unwrap();

        let records = manager.applied_migrations().await.unwrap();
        assert!(records.is_empty());
    }
}

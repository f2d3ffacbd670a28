//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod class_members;
mod classes;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{ClassPassError, Result};
use crate::utils::student_id::StudentIdGenerator;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) student_ids: StudentIdGenerator,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按指定连接参数创建存储实例
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self {
            db,
            student_ids: StudentIdGenerator::new(),
        })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassPassError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassPassError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassPassError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassPassError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    class_members::{
        entities::{AnonymousJoinOutcome, ClassMember},
        responses::ClassMemberInfo,
    },
    classes::{entities::Class, requests::CreateClassRequest, responses::ClassSummary},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(user_id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_passphrase(&self, passphrase: &str) -> Result<Option<Class>> {
        self.get_class_by_passphrase_impl(passphrase).await
    }

    async fn list_owned_classes(&self, owner_id: &str) -> Result<Vec<ClassSummary>> {
        self.list_owned_classes_impl(owner_id).await
    }

    async fn list_enrolled_classes(&self, user_id: &str) -> Result<Vec<ClassSummary>> {
        self.list_enrolled_classes_impl(user_id).await
    }

    async fn delete_class(&self, class_id: &str) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_class_members(&self, class_id: &str) -> Result<i64> {
        self.count_class_members_impl(class_id).await
    }

    // 班级成员模块
    async fn join_class(&self, class_id: &str, user_id: &str) -> Result<ClassMember> {
        self.join_class_impl(class_id, user_id).await
    }

    async fn join_class_anonymous(
        &self,
        passphrase: &str,
        first_name: &str,
        pin_code: &str,
    ) -> Result<AnonymousJoinOutcome> {
        self.join_class_anonymous_impl(passphrase, first_name, pin_code)
            .await
    }

    async fn list_class_members(&self, class_id: &str) -> Result<Vec<ClassMemberInfo>> {
        self.list_class_members_impl(class_id).await
    }

    async fn reset_student_pin(&self, class_id: &str, student_id: &str) -> Result<User> {
        self.reset_student_pin_impl(class_id, student_id).await
    }

    async fn set_student_pin(&self, user_id: &str, pin_code: &str) -> Result<User> {
        self.set_student_pin_impl(user_id, pin_code).await
    }

    async fn remove_member(&self, class_id: &str, user_id: &str) -> Result<()> {
        self.remove_member_impl(class_id, user_id).await
    }

    async fn leave_class(&self, class_id: &str, user_id: &str) -> Result<()> {
        self.leave_class_impl(class_id, user_id).await
    }
}

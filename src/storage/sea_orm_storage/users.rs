//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Entity as Users};
use crate::errors::{ClassPassError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::utils::password::hash_password;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, SqlErr};

impl SeaOrmStorage {
    /// 创建注册用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let password_hash = hash_password(&req.password)?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            password_hash: Set(password_hash),
            user_type: Set(req.user_type.to_string()),
            pin_code: Set(None),
            pin_reset_required: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            // 主键冲突说明该用户ID已被注册
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ClassPassError::validation("用户ID已被注册")
                }
                _ => ClassPassError::database_operation(format!("创建用户失败: {e}")),
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, user_id: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }
}

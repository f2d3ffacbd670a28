//! 用户实体
//!
//! 既包含注册账号（teacher / student），也包含匿名加入时派生的临时学生身份。
//! PIN 字段仅对匿名学生有意义。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub user_type: String,
    pub pin_code: Option<String>,
    pub pin_reset_required: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::class_members::Entity")]
    ClassMembers,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::class_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserType};
        use chrono::{DateTime, Utc};

        User {
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            user_type: self
                .user_type
                .parse::<UserType>()
                .unwrap_or(UserType::Student),
            pin_code: self.pin_code,
            pin_reset_required: self.pin_reset_required,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

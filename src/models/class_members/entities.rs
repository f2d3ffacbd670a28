use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMember {
    pub id: String,
    pub class_id: String,
    pub user_id: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

/// 匿名加入的复合结果：班级、成员关系与（可能新建的）学生身份
#[derive(Debug, Clone)]
pub struct AnonymousJoinOutcome {
    pub class: Class,
    pub member: ClassMember,
    pub student: User,
    /// 本次加入是否新建了学生身份
    pub provisioned: bool,
}

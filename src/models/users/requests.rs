use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserType;

// 创建注册用户请求（来自注册接口）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub user_type: UserType,
}

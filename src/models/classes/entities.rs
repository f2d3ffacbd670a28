use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: String,
    // 班级名称
    pub name: String,
    // 科目
    pub subject: String,
    // 班级描述
    pub description: Option<String>,
    // 加入通行码，全局唯一
    pub passphrase: String,
    // 班主任（创建者）ID
    pub owner_id: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

use serde::Serialize;
use ts_rs::TS;

// 班级概要（我创建的 / 我加入的 列表项）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub description: Option<String>,
    // 仅班主任视角返回通行码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    pub owner_id: String,
    pub owner_name: String,
    pub member_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

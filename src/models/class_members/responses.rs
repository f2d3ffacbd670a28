use serde::Serialize;
use ts_rs::TS;

// 成员列表项：身份投影 + 加入时间（班主任视角，含 PIN 状态）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMemberInfo {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub pin_code: Option<String>,
    pub pin_reset_required: bool,
}

// 登录用户加入班级的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct JoinClassResponse {
    pub class_id: String,
    pub class_name: String,
    pub subject: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 匿名加入班级的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct AnonymousJoinResponse {
    pub class_id: String,
    pub class_name: String,
    pub subject: String,
    pub student_id: String,
    pub first_name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 重置学生 PIN 的响应，新 PIN 由班主任转告学生
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ResetPinResponse {
    pub student_id: String,
    pub first_name: String,
    pub pin_code: String,
    pub pin_reset_required: bool,
}

use serde::Deserialize;
use ts_rs::TS;

// 登录用户通过通行码加入班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct JoinClassRequest {
    pub passphrase: String,
}

// 匿名学生加入班级
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct AnonymousJoinRequest {
    pub passphrase: String,
    pub first_name: String,
    pub pin_code: String,
}

// 匿名学生在 PIN 被重置后设置新 PIN
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct SetPinRequest {
    pub student_id: String,
    pub pin_code: String,
}

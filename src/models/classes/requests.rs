use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
//
// owner_id 不从请求体读取，由服务层根据当前登录教师填充。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    #[serde(skip)]
    #[ts(skip)]
    pub owner_id: Option<String>,
    pub name: String,
    pub subject: String,
    pub description: Option<String>,
}

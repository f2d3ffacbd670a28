use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户类型
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserType {
    Student, // 学生（注册或匿名）
    Teacher, // 教师
}

impl UserType {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";

    pub fn teacher_roles() -> &'static [&'static UserType] {
        &[&Self::Teacher]
    }
    pub fn all_roles() -> &'static [&'static UserType] {
        &[&Self::Student, &Self::Teacher]
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserType::STUDENT => Ok(UserType::Student),
            UserType::TEACHER => Ok(UserType::Teacher),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户类型: '{s}'. 支持的类型: student, teacher"
            ))),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Student => write!(f, "{}", UserType::STUDENT),
            UserType::Teacher => write!(f, "{}", UserType::TEACHER),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserType::Student),
            "teacher" => Ok(UserType::Teacher),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    // 用户ID：注册账号的登录标识，或匿名学生的派生ID
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    // 密码哈希不对外序列化；匿名学生为空串
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: String,
    pub user_type: UserType,
    // 仅匿名学生持有 PIN
    pub pin_code: Option<String>,
    pub pin_reset_required: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 是否为匿名（无密码）学生身份
    pub fn is_anonymous_student(&self) -> bool {
        self.user_type == UserType::Student && self.password_hash.is_empty()
    }
}

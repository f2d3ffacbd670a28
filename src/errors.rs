//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classpass_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum ClassPassError {
            $($variant(String),)*
        }

        impl ClassPassError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassPassError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassPassError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassPassError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassPassError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassPassError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classpass_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    Validation("E005", "Validation Error"),
    ClassNotFound("E006", "Class Not Found"),
    InvalidPassphrase("E007", "Invalid Passphrase"),
    IdentityNotFound("E008", "Identity Not Found"),
    AlreadyMember("E009", "Already A Member"),
    GenerationExhausted("E010", "Credential Generation Exhausted"),
    NotOwner("E011", "Not Class Owner"),
    OwnerCannotLeave("E012", "Owner Cannot Leave"),
    NotAMember("E013", "Not A Member"),
    InvalidPin("E014", "Invalid PIN"),
    PinResetRequired("E015", "PIN Reset Required"),
    Authentication("E016", "Authentication Error"),
    Authorization("E017", "Authorization Error"),
}

impl ClassPassError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassPassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassPassError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassPassError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassPassError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassPassError {
    fn from(err: std::io::Error) -> Self {
        ClassPassError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassPassError {
    fn from(err: serde_json::Error) -> Self {
        ClassPassError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassPassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassPassError::database_config("test").code(), "E001");
        assert_eq!(ClassPassError::validation("test").code(), "E005");
        assert_eq!(ClassPassError::invalid_pin("test").code(), "E014");
        assert_eq!(ClassPassError::pin_reset_required("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassPassError::already_member("test").error_type(),
            "Already A Member"
        );
        assert_eq!(
            ClassPassError::generation_exhausted("test").error_type(),
            "Credential Generation Exhausted"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassPassError::invalid_passphrase("no class for ABC23456");
        assert_eq!(err.message(), "no class for ABC23456");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassPassError::owner_cannot_leave("owner u1 in class c1");
        let formatted = err.format_simple();
        assert!(formatted.contains("Owner Cannot Leave"));
        assert!(formatted.contains("u1"));
    }
}

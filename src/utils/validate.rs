use once_cell::sync::Lazy;
use regex::Regex;

static PIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("Invalid pin regex"));

static USER_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._@+-]+$").expect("Invalid user id regex")
});

pub fn validate_class_name(name: &str) -> Result<(), &'static str> {
    // 班级名称长度校验：1 <= x <= 100
    if name.is_empty() || name.len() > 100 {
        return Err("Class name must be between 1 and 100 characters");
    }
    Ok(())
}

pub fn validate_subject(subject: &str) -> Result<(), &'static str> {
    if subject.is_empty() || subject.len() > 100 {
        return Err("Subject must be between 1 and 100 characters");
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), &'static str> {
    if let Some(desc) = description
        && desc.len() > 1000
    {
        return Err("Description must be at most 1000 characters");
    }
    Ok(())
}

pub fn validate_passphrase_input(passphrase: &str) -> Result<(), &'static str> {
    // 只校验形状，是否存在由存储层裁决
    if passphrase.is_empty() || passphrase.len() > 12 {
        return Err("Passphrase must be between 1 and 12 characters");
    }
    Ok(())
}

pub fn validate_first_name(first_name: &str) -> Result<(), &'static str> {
    let trimmed = first_name.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err("First name must be between 1 and 50 characters");
    }
    Ok(())
}

pub fn validate_pin_code(pin: &str) -> Result<(), &'static str> {
    // PIN 必须是恰好 4 位数字
    if !PIN_RE.is_match(pin) {
        return Err("PIN code must be exactly 4 digits");
    }
    Ok(())
}

pub fn validate_user_id(user_id: &str) -> Result<(), &'static str> {
    // 登录标识长度校验：3 <= x <= 64
    if user_id.len() < 3 || user_id.len() > 64 {
        return Err("User id length must be between 3 and 64 characters");
    }
    if !USER_ID_RE.is_match(user_id) {
        return Err("User id must contain only letters, numbers, or . _ @ + -");
    }
    Ok(())
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：字母 + 数字
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_bounds() {
        assert!(validate_class_name("Math 101").is_ok());
        assert!(validate_class_name("").is_err());
        assert!(validate_class_name(&"x".repeat(101)).is_err());
        assert!(validate_class_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_subject_bounds() {
        assert!(validate_subject("Physics").is_ok());
        assert!(validate_subject("").is_err());
        assert!(validate_subject(&"s".repeat(101)).is_err());
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("intro course")).is_ok());
        assert!(validate_description(Some(&"d".repeat(1001))).is_err());
    }

    #[test]
    fn test_pin_code_shape() {
        assert!(validate_pin_code("1234").is_ok());
        assert!(validate_pin_code("0000").is_ok());
        assert!(validate_pin_code("123").is_err());
        assert!(validate_pin_code("12345").is_err());
        assert!(validate_pin_code("12a4").is_err());
    }

    #[test]
    fn test_first_name_bounds() {
        assert!(validate_first_name("John").is_ok());
        assert!(validate_first_name("   ").is_err());
        assert!(validate_first_name(&"n".repeat(51)).is_err());
    }

    #[test]
    fn test_user_id_format() {
        assert!(validate_user_id("teacher@example.com").is_ok());
        assert!(validate_user_id("ab").is_err());
        assert!(validate_user_id("has space").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("abcd1234").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("abcdefgh").is_err());
    }
}

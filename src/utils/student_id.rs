//! 匿名学生身份派生
//!
//! 派生 ID 形如 `student_<归一化名字>_<序号>`，序号来自一个单调递增计数器，
//! 保证同名学生在同一瞬间加入也会得到不同的 ID。

use std::sync::atomic::{AtomicI64, Ordering};

/// 匿名学生 ID 生成器
///
/// 计数器默认以构造时的 Unix 时间戳为种子，测试可注入固定种子。
pub struct StudentIdGenerator {
    counter: AtomicI64,
}

impl StudentIdGenerator {
    pub fn new() -> Self {
        Self::with_seed(chrono::Utc::now().timestamp())
    }

    pub fn with_seed(seed: i64) -> Self {
        Self {
            counter: AtomicI64::new(seed),
        }
    }

    /// 派生下一个学生 ID，全局唯一且创建后不变
    pub fn next_id(&self, first_name: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("student_{}_{}", normalize_first_name(first_name), seq)
    }
}

impl Default for StudentIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 名字归一化：去首尾空白、转小写，其余非 `[a-z0-9]` 字符替换为下划线
pub fn normalize_first_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_first_name() {
        assert_eq!(normalize_first_name("John"), "john");
        assert_eq!(normalize_first_name("  Mary Ann "), "mary_ann");
        assert_eq!(normalize_first_name("José"), "jos_");
        assert_eq!(normalize_first_name("x9"), "x9");
    }

    #[test]
    fn test_next_id_format_is_stable() {
        let ids = StudentIdGenerator::with_seed(1_700_000_000);
        assert_eq!(ids.next_id("John"), "student_john_1700000000");
        assert_eq!(ids.next_id("John"), "student_john_1700000001");
    }

    #[test]
    fn test_same_name_same_instant_gets_distinct_ids() {
        let ids = StudentIdGenerator::with_seed(42);
        let a = ids.next_id("Ada");
        let b = ids.next_id("Ada");
        assert_ne!(a, b);
    }
}

//! 凭据生成：班级通行码与学生 PIN

use std::future::Future;

use rand::Rng;

use crate::errors::{ClassPassError, Result};

/// 通行码字符集：大写字母 + 数字，排除易混淆的 0、O、1、I、L
pub const PASSPHRASE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// 通行码长度
pub const PASSPHRASE_LEN: usize = 8;

/// PIN 长度
pub const PIN_LEN: usize = 4;

// 31^8 的键空间下实际不可能耗尽，重试上限只是兜底
const MAX_ATTEMPTS: usize = 100;

/// 抽取一个通行码候选值（纯随机，不查重）
pub fn passphrase_candidate() -> String {
    let mut rng = rand::rng();
    (0..PASSPHRASE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..PASSPHRASE_ALPHABET.len());
            PASSPHRASE_ALPHABET[idx] as char
        })
        .collect()
}

/// 生成全局唯一的班级通行码
///
/// exists 回调负责查询是否已有同值通行码，本模块不直接触达存储层。
/// 重试 [`MAX_ATTEMPTS`] 次仍冲突则返回 `GenerationExhausted`。
pub async fn generate_passphrase<F, Fut>(exists: F) -> Result<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    for _ in 0..MAX_ATTEMPTS {
        let candidate = passphrase_candidate();
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(ClassPassError::generation_exhausted(format!(
        "no unused passphrase found after {MAX_ATTEMPTS} attempts"
    )))
}

/// 生成 4 位数字 PIN
///
/// PIN 按学生独立存储，不要求全局唯一，数字 0-9 均可出现。
pub fn generate_pin() -> String {
    let mut rng = rand::rng();
    (0..PIN_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_passphrase_candidate_shape() {
        for _ in 0..200 {
            let p = passphrase_candidate();
            assert_eq!(p.len(), PASSPHRASE_LEN);
            assert!(p.bytes().all(|b| PASSPHRASE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_passphrase_excludes_confusable_chars() {
        for _ in 0..500 {
            let p = passphrase_candidate();
            for c in ['0', 'O', '1', 'I', 'L'] {
                assert!(!p.contains(c), "confusable char {c} in {p}");
            }
        }
    }

    #[test]
    fn test_pin_is_four_digits() {
        for _ in 0..200 {
            let pin = generate_pin();
            assert_eq!(pin.len(), PIN_LEN);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_generate_passphrase_retries_on_collision() {
        let calls = AtomicUsize::new(0);
        let passphrase = generate_passphrase(|_candidate| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n < 3) } // 前三个候选值假装已被占用
        })
        .await
        .unwrap();

        assert_eq!(passphrase.len(), PASSPHRASE_LEN);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_generate_passphrase_exhaustion() {
        let err = generate_passphrase(|_candidate| async { Ok(true) })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_generate_passphrase_propagates_lookup_error() {
        let err = generate_passphrase(|_candidate| async {
            Err(crate::errors::ClassPassError::database_operation("boom"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E003");
    }
}

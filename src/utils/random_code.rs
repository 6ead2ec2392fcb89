//! 班级邀请码生成
//!
//! 邀请码取自十六进制大写字符集，默认 6 位。唯一性由存储层在
//! 有限次重试内校验，重试耗尽后升级到更长的码空间。

use rand::Rng;

const CODE_CHARSET: &[u8] = b"0123456789ABCDEF";

/// 默认邀请码长度
pub const CLASS_CODE_LEN: usize = 6;
/// 冲突回退时使用的加长邀请码长度
pub const CLASS_CODE_LEN_EXTENDED: usize = 8;
/// 每个码空间内的最大尝试次数
pub const CLASS_CODE_MAX_ATTEMPTS: usize = 8;

/// 生成指定长度的邀请码
pub fn generate_class_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_class_code(CLASS_CODE_LEN).len(), 6);
        assert_eq!(generate_class_code(CLASS_CODE_LEN_EXTENDED).len(), 8);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_class_code(64);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit() && !c.is_lowercase()));
    }
}

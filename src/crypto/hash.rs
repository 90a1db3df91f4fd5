//! SM3 摘要原语。

use sm3::{Digest, Sm3};

/// SM3 摘要的固定长度（字节）。
pub const DIGEST_LEN: usize = 32;

/// 计算任意字节序列的 SM3 摘要。
///
/// 对任意长度（包括空输入）都返回恰好 32 字节。
#[must_use]
pub fn sm3_hash(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sm3::new();
    hasher.update(data);
    let digest = hasher.finalize();

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&digest);
    out
}

/// 计算字符串 UTF-8 字节的 SM3 摘要。
#[must_use]
pub fn sm3_hash_str(data: &str) -> [u8; DIGEST_LEN] {
    sm3_hash(data.as_bytes())
}

//! RC4 流密码。
//!
//! 与常见实现不同，这里的明文是一串字符码而非字节：
//! 大于 255 的字符码与密钥流字节异或后，高位原样保留。
//! 签名载荷中确实存在这样的值，因此不能先截断成 `u8`。

use crate::crypto::ByteWord;
use crate::error::{Result, SignError};

const STATE_SIZE: usize = 256;

/// 使用 `key` 对 `plaintext` 进行 RC4 加密。
///
/// 算法是对称的，用同一密钥再加密一次即可还原明文。
/// 密钥按 UTF-16 代码单元参与密钥调度。
///
/// # 错误
///
/// * `SignError::EmptyCipherKey` - 密钥为空。
pub fn rc4_encrypt(plaintext: &[ByteWord], key: &str) -> Result<Vec<ByteWord>> {
    let key_codes: Vec<usize> = key.encode_utf16().map(usize::from).collect();
    if key_codes.is_empty() {
        return Err(SignError::EmptyCipherKey);
    }

    let mut s: [usize; STATE_SIZE] = std::array::from_fn(|i| i);

    let mut j = 0usize;
    for i in 0..STATE_SIZE {
        j = (j + s[i] + key_codes[i % key_codes.len()]) % STATE_SIZE;
        s.swap(i, j);
    }

    let mut i = 0usize;
    j = 0;
    let cipher = plaintext
        .iter()
        .map(|&code| {
            i = (i + 1) % STATE_SIZE;
            j = (j + s[i]) % STATE_SIZE;
            s.swap(i, j);
            let t = (s[i] + s[j]) % STATE_SIZE;
            s[t] as ByteWord ^ code
        })
        .collect();

    Ok(cipher)
}

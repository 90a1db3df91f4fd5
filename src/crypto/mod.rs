//! 签名算法用到的底层密码学原语。
//!
//! - [`hash`]：SM3 摘要。
//! - [`rc4`]：按字符码工作的 RC4 流密码。
//! - [`alphabet`]：使用私有字母表的类 Base64 编码。

pub mod alphabet;
pub mod hash;
pub mod rc4;

/// 流水线中流转的逻辑字节。
///
/// 使用比 `u8` 更宽的整数表示，以便位移与异或运算不会发生符号扩展，
/// 并且能承载少数超出 255 的协议字段。
pub type ByteWord = u32;

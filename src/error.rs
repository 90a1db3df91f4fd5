//! 定义签名过程中可能发生的错误。

use thiserror::Error;

/// 签名引擎与其外围配置层可能返回的错误。
///
/// 签名流水线本身只会因前置条件不满足而失败，
/// 这类错误都表示调用方或常量表存在编程错误，不应重试。
#[derive(Debug, Error)]
pub enum SignError {
    /// RC4 密钥为空。
    #[error("RC4 密钥不能为空")]
    EmptyCipherKey,

    /// 浏览器指纹常量格式错误。
    #[error("浏览器指纹无效: {0}")]
    InvalidFingerprint(String),

    /// 计算得到的字符码超出字符串可表示的范围。
    #[error("位置 {index} 的字符码 {value:#X} 超出有效范围 (0..=0x10FFFF)")]
    CharCodeOutOfRange {
        /// 出错元素在缓冲区中的位置。
        index: usize,
        /// 出错的值。
        value: u32,
    },

    /// 配置内容不合法。
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写等 IO 错误。
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 配置解析失败。
    #[error("解析 TOML 配置失败: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML 配置序列化失败。
    #[error("序列化 TOML 配置失败: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// URL 解析失败。
    #[error("URL 解析失败: {0}")]
    Url(#[from] url::ParseError),

    /// 服务端返回了无效的响应。
    #[error("无效响应: {0}")]
    InvalidResponse(String),
}

/// `douyin_sign_rs` 中使用的 `Result` 类型别名。
pub type Result<T> = std::result::Result<T, SignError>;

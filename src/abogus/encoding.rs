//! 指纹与查询字符串编码。

use tracing::error;
use url::form_urlencoded::byte_serialize;

use crate::crypto::ByteWord;
use crate::error::{Result, SignError};
use crate::model::ParameterMap;

/// 模拟的浏览器环境指纹：屏幕与窗口尺寸、色深以及平台名。
///
/// 这是协议常量，不可配置。
pub const BROWSER_FINGERPRINT: &str =
    "1536|742|1536|864|0|0|0|0|1536|864|1536|864|1536|742|24|24|MacIntel";

/// 字符码允许的最大值。
pub const MAX_CHAR_CODE: ByteWord = 0x10_FFFF;

/// 将指纹字符串转换为逐字符的字符码序列。
///
/// # 错误
///
/// * `SignError::InvalidFingerprint` - 指纹为空，或包含 Latin-1 以外的字符。
pub fn fingerprint_codes(fingerprint: &str) -> Result<Vec<ByteWord>> {
    if fingerprint.is_empty() {
        return Err(SignError::InvalidFingerprint("指纹不能为空".into()));
    }

    fingerprint
        .encode_utf16()
        .map(|unit| {
            if unit > 0xFF {
                Err(SignError::InvalidFingerprint(format!(
                    "包含非 Latin-1 字符 {unit:#06X}"
                )))
            } else {
                Ok(ByteWord::from(unit))
            }
        })
        .collect()
}

/// 按 `application/x-www-form-urlencoded` 规则编码参数表，保持原有顺序。
///
/// 空格编码为 `+`，`*-._` 与字母数字保持原样，其余字节编码为大写的 `%XX`。
#[must_use]
pub fn encode_query(params: &ParameterMap) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let key: String = byte_serialize(key.as_bytes()).collect();
            let value: String = byte_serialize(value.as_bytes()).collect();
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// 把数值序列当作字符码序列，逐个检查取值范围。
///
/// # 错误
///
/// * `SignError::CharCodeOutOfRange` - 某个值超过 [`MAX_CHAR_CODE`]。
pub fn from_char_codes(values: &[ByteWord]) -> Result<Vec<ByteWord>> {
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|&(_, &v)| v > MAX_CHAR_CODE)
    {
        error!(index, value, "字符码越界，常量表可能被错误修改");
        return Err(SignError::CharCodeOutOfRange { index, value });
    }
    Ok(values.to_vec())
}

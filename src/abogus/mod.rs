//! `a_bogus` 签名生成器。
//!
//! 生成抖音 Web 接口要求的签名参数。所有常量均为协议的一部分，
//! 任何改动都会让服务端拒绝请求。
//!
//! # 流程
//!
//! 1. [`string1::generate_string1`]：三组随机数与掩码组合出 12 个字符码。
//! 2. [`encoding::encode_query`]：按顺序编码请求参数。
//! 3. [`string2::generate_string2`]：参数摘要、时间戳、指纹与校验值经 RC4 加密。
//! 4. 拼接两段后交给 [`alphabet::encode`] 得到最终签名。

pub mod encoding;
pub mod params_code;
pub mod string1;
pub mod string2;

use tracing::{debug, instrument};

use crate::crypto::{ByteWord, alphabet};
use crate::entropy::{EntropySource, SystemEntropy};
use crate::error::Result;
use crate::model::ParameterMap;

use self::encoding::{BROWSER_FINGERPRINT, encode_query, fingerprint_codes};

/// `a_bogus` 签名生成器。
///
/// 自身只持有不可变的指纹字符码表，可以在线程间共享；
/// 每次签名所需的随机数与时间由调用方传入或在调用内部临时创建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ABogus {
    browser_code: Vec<ByteWord>,
}

impl ABogus {
    /// 使用内置的浏览器指纹创建签名器。
    pub fn new() -> Result<Self> {
        Ok(Self {
            browser_code: fingerprint_codes(BROWSER_FINGERPRINT)?,
        })
    }

    /// 指纹的字符码序列。
    #[must_use]
    pub fn browser_code(&self) -> &[ByteWord] {
        &self.browser_code
    }

    /// 使用系统时间与线程本地随机数为参数表生成签名。
    pub fn get_value(&self, url_params: &ParameterMap) -> Result<String> {
        self.get_value_with(url_params, &mut SystemEntropy::new())
    }

    /// 使用给定的熵来源为参数表生成签名。
    ///
    /// 相同的参数与相同的熵序列总是产生相同的签名。
    #[instrument(skip_all, fields(params = url_params.len()))]
    pub fn get_value_with<E: EntropySource + ?Sized>(
        &self,
        url_params: &ParameterMap,
        entropy: &mut E,
    ) -> Result<String> {
        let string1 = string1::generate_string1(entropy);
        let query = encode_query(url_params);
        let string2 = string2::generate_string2(&query, &self.browser_code, entropy)?;

        let mut combined = string1;
        combined.extend(string2);

        let token = alphabet::encode(&combined);
        debug!(len = token.len(), "a_bogus 生成完毕");
        Ok(token)
    }
}

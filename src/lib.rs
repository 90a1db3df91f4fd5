//! # `douyin_sign_rs`
//!
//! 抖音 Web API 请求签名 `a_bogus` 的 Rust 实现。
//!
//! 抖音 Web 接口会拒绝未携带 `a_bogus` 参数的请求。该参数由请求参数与当前时间
//! 派生：SM3 双重摘要、带时间戳的载荷、RC4 加密，以及使用私有字母表的类 Base64 编码。
//! 本库只负责生成签名与组装请求，HTTP 传输由调用方自行实现。
//!
//! ## 示例
//!
//! ```no_run
//! use douyin_sign_rs::{DouyinRequest, RequestProfile, RequestSigner};
//!
//! let signer = RequestSigner::new(RequestProfile::default())?;
//! let request = DouyinRequest::PostDetail { aweme_id: "7345492945006595379".into() };
//! let signed = signer.sign_request(&request, "your cookie")?;
//! println!("{}", signed.url);
//! # Ok::<(), douyin_sign_rs::SignError>(())
//! ```

pub mod abogus;
pub mod config;
pub mod crypto;
pub mod entropy;
pub mod error;
pub mod model;
pub mod request;

pub use abogus::ABogus;
pub use entropy::{EntropySource, FixedEntropy, SystemEntropy};
pub use error::{Result, SignError};
pub use model::{DouyinRequest, ParameterMap, RequestProfile, build_params};
pub use request::{HttpMethod, RequestSigner, SignedRequest, validate_response_body};

/// 使用内置指纹、系统时间与随机数为参数表生成 `a_bogus`。
pub fn sign(params: &ParameterMap) -> Result<String> {
    ABogus::new()?.get_value(params)
}

//! 组装带签名的 Web API 请求。
//!
//! 本模块只负责生成最终的 URL 与请求头，不发送请求；
//! 实际的 HTTP 传输、重试与响应解析由调用方负责。

use const_format::formatcp;
use tracing::{info, instrument, warn};
use url::Url;

use crate::abogus::ABogus;
use crate::entropy::{EntropySource, SystemEntropy};
use crate::error::{Result, SignError};
use crate::model::{DouyinRequest, ParameterMap, RequestProfile, build_params};

const DOUYIN_BASE_URL: &str = "https://www.douyin.com";
const POST_DETAIL_METHOD: &str = "/aweme/v1/web/aweme/detail/";
const JINGXUAN_FEED_METHOD: &str = "/aweme/v2/web/module/feed/";

/// 作品详情接口。
pub const API_URL_POST_DETAIL: &str = formatcp!("{DOUYIN_BASE_URL}{POST_DETAIL_METHOD}");
/// 精选推荐流接口。
pub const API_URL_JINGXUAN_FEED: &str = formatcp!("{DOUYIN_BASE_URL}{JINGXUAN_FEED_METHOD}");

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36";
pub const REFERER: &str = formatcp!("{DOUYIN_BASE_URL}/");
pub const ACCEPT: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// 签名参数在查询字符串中的名称。
pub const SIGNATURE_PARAM: &str = "a_bogus";

/// HTTP 请求方法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl DouyinRequest {
    /// 接口地址。
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::PostDetail { .. } => API_URL_POST_DETAIL,
            Self::JingxuanFeed => API_URL_JINGXUAN_FEED,
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::PostDetail { .. } => HttpMethod::Get,
            Self::JingxuanFeed => HttpMethod::Post,
        }
    }
}

/// 已签名、可直接交给 HTTP 客户端发送的请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// `POST` 请求的表单体，`GET` 请求为 `None`。
    pub body: Option<String>,
}

impl SignedRequest {
    /// 查找请求头（不区分大小写）。
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 把参数表与签名依次追加到接口地址上。
pub fn signed_url(endpoint: &str, params: &ParameterMap, signature: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.iter() {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(SIGNATURE_PARAM, signature);
    }
    Ok(url)
}

/// 每个请求都需要携带的固定请求头。
#[must_use]
pub fn default_headers(cookie: &str) -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Referer".to_string(), REFERER.to_string()),
        ("Cookie".to_string(), cookie.to_string()),
        ("Accept".to_string(), ACCEPT.to_string()),
    ]
}

/// 组合请求参数配置与签名器，为各个接口生成签名请求。
#[derive(Debug, Clone)]
pub struct RequestSigner {
    abogus: ABogus,
    profile: RequestProfile,
}

impl RequestSigner {
    pub fn new(profile: RequestProfile) -> Result<Self> {
        Ok(Self {
            abogus: ABogus::new()?,
            profile,
        })
    }

    /// 从用户配置目录加载参数配置，文件不存在时使用默认值。
    pub fn from_config() -> Result<Self> {
        Self::new(crate::config::load_request_profile()?)
    }

    #[must_use]
    pub const fn profile(&self) -> &RequestProfile {
        &self.profile
    }

    /// 使用系统时间与随机数为请求签名。
    pub fn sign_request(&self, request: &DouyinRequest, cookie: &str) -> Result<SignedRequest> {
        self.sign_request_with(request, cookie, &mut SystemEntropy::new())
    }

    /// 使用给定的熵来源为请求签名。
    #[instrument(skip(self, cookie, entropy))]
    pub fn sign_request_with<E: EntropySource + ?Sized>(
        &self,
        request: &DouyinRequest,
        cookie: &str,
        entropy: &mut E,
    ) -> Result<SignedRequest> {
        if cookie.trim().is_empty() {
            warn!("Cookie 为空，服务端很可能返回空响应");
        }

        let params = build_params(&self.profile, request);
        let signature = self.abogus.get_value_with(&params, entropy)?;
        let url = signed_url(request.endpoint(), &params, &signature)?;

        let method = request.method();
        let mut headers = default_headers(cookie);
        let body = match method {
            HttpMethod::Get => None,
            HttpMethod::Post => {
                headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
                Some(String::new())
            }
        };

        info!(endpoint = request.endpoint(), "已生成签名请求");
        Ok(SignedRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

/// 检查响应是否有效。
///
/// 仅接受状态码 200；空白响应体或 `blocked` 通常意味着 Cookie 已失效。
pub fn validate_response_body(status: u16, body: &str) -> Result<&str> {
    if status != 200 {
        return Err(SignError::InvalidResponse(format!(
            "请求失败，状态码：{status}（仅支持200）"
        )));
    }
    if body.trim().is_empty() {
        return Err(SignError::InvalidResponse(
            "Cookie无效：响应体为空字符串".into(),
        ));
    }
    if body == "blocked" {
        return Err(SignError::InvalidResponse("Cookie无效：响应体为blocked".into()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::FixedEntropy;

    fn signer() -> RequestSigner {
        RequestSigner::new(RequestProfile::default()).unwrap()
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            API_URL_POST_DETAIL,
            "https://www.douyin.com/aweme/v1/web/aweme/detail/"
        );
        assert_eq!(
            API_URL_JINGXUAN_FEED,
            "https://www.douyin.com/aweme/v2/web/module/feed/"
        );
        assert_eq!(REFERER, "https://www.douyin.com/");
    }

    #[test]
    fn test_post_detail_request() {
        let request = DouyinRequest::PostDetail {
            aweme_id: "7345492945006595379".into(),
        };
        let mut entropy = FixedEntropy::new([0.123_456, 0.654_321, 0.999], 1_700_000_000_000, 5);
        let signed = signer()
            .sign_request_with(&request, "sessionid=abc", &mut entropy)
            .unwrap();

        assert_eq!(signed.method, HttpMethod::Get);
        assert!(signed.body.is_none());
        assert_eq!(signed.header("cookie"), Some("sessionid=abc"));
        assert_eq!(signed.header("Referer"), Some(REFERER));

        let pairs: Vec<(String, String)> = signed.url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 36);
        assert_eq!(pairs[0].0, "device_platform");
        assert_eq!(pairs[0].1, "webapp");
        assert_eq!(pairs[33].0, "aweme_id");
        assert_eq!(pairs[33].1, "7345492945006595379");
        assert_eq!(pairs[34].0, "msToken");
        assert!(pairs[34].1.is_empty());
        assert_eq!(pairs[35].0, SIGNATURE_PARAM);
        assert_eq!(pairs[35].1.len(), 168);
    }

    #[test]
    fn test_feed_request_is_post() {
        let mut entropy = FixedEntropy::new([0.5], 1_700_000_000_000, 4);
        let signed = signer()
            .sign_request_with(&DouyinRequest::JingxuanFeed, "c=1", &mut entropy)
            .unwrap();

        assert_eq!(signed.method, HttpMethod::Post);
        assert_eq!(signed.body.as_deref(), Some(""));
        assert_eq!(signed.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert!(signed.url.as_str().starts_with(API_URL_JINGXUAN_FEED));
    }

    #[test]
    fn test_signature_survives_url_round_trip() {
        let params: ParameterMap = [("a", "1")].into_iter().collect();
        let signature = "Dk/-Ce==";
        let url = signed_url(API_URL_POST_DETAIL, &params, signature).unwrap();

        let decoded = url
            .query_pairs()
            .find(|(k, _)| k == SIGNATURE_PARAM)
            .map(|(_, v)| v.into_owned());
        assert_eq!(decoded.as_deref(), Some(signature));
    }

    #[test]
    fn test_validate_response_body() {
        assert_eq!(validate_response_body(200, "{}").unwrap(), "{}");
        assert!(validate_response_body(403, "{}").is_err());
        assert!(validate_response_body(200, "  ").is_err());
        assert!(validate_response_body(200, "blocked").is_err());
    }
}

//! 请求参数模型。
//!
//! 每个接口的参数由一组公共字段（[`RequestProfile`]）加上接口特有的字段
//! （[`DouyinRequest::extra_fields`]）合并而成。参数顺序会影响签名结果，
//! 因此全部使用保序的 [`ParameterMap`]。

use serde::{Deserialize, Serialize};

/// 保持插入顺序的字符串键值表。
///
/// 重复插入同一个键会原地覆盖旧值，不改变它的位置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 插入一个键值对，返回被覆盖的旧值。
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历所有键值对。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// 所有 Web 接口共用的设备与浏览器参数。
///
/// 字段顺序即参数顺序，不要随意调整。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RequestProfile {
    pub device_platform: String,
    pub aid: String,
    pub channel: String,
    pub pc_client_type: u32,
    pub version_code: String,
    pub version_name: String,
    pub cookie_enabled: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub browser_language: String,
    pub browser_platform: String,
    pub browser_name: String,
    pub browser_version: String,
    pub browser_online: String,
    pub engine_name: String,
    pub engine_version: String,
    pub os_name: String,
    pub os_version: String,
    pub cpu_core_num: u32,
    pub device_memory: u32,
    pub platform: String,
    pub downlink: String,
    pub effective_type: String,
    pub from_user_page: String,
    pub locate_query: String,
    pub need_time_list: String,
    pub pc_libra_divert: String,
    pub publish_video_strategy_type: String,
    pub round_trip_time: String,
    pub show_live_replay_strategy: String,
    pub time_list_query: String,
    pub whale_cut_token: String,
    pub update_version_code: String,
}

impl Default for RequestProfile {
    fn default() -> Self {
        Self {
            device_platform: "webapp".into(),
            aid: "6383".into(),
            channel: "channel_pc_web".into(),
            pc_client_type: 1,
            version_code: "290100".into(),
            version_name: "29.1.0".into(),
            cookie_enabled: "true".into(),
            screen_width: 1920,
            screen_height: 1080,
            browser_language: "zh-CN".into(),
            browser_platform: "Win32".into(),
            browser_name: "Chrome".into(),
            browser_version: "130.0.0.0".into(),
            browser_online: "true".into(),
            engine_name: "Blink".into(),
            engine_version: "130.0.0.0".into(),
            os_name: "Windows".into(),
            os_version: "10".into(),
            cpu_core_num: 12,
            device_memory: 8,
            platform: "PC".into(),
            downlink: "10".into(),
            effective_type: "4g".into(),
            from_user_page: "1".into(),
            locate_query: "false".into(),
            need_time_list: "1".into(),
            pc_libra_divert: "Windows".into(),
            publish_video_strategy_type: "2".into(),
            round_trip_time: "0".into(),
            show_live_replay_strategy: "1".into(),
            time_list_query: "0".into(),
            whale_cut_token: String::new(),
            update_version_code: "170400".into(),
        }
    }
}

impl RequestProfile {
    /// 按固定顺序展开为参数表。
    #[must_use]
    pub fn to_params(&self) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("device_platform", &self.device_platform);
        map.insert("aid", &self.aid);
        map.insert("channel", &self.channel);
        map.insert("pc_client_type", self.pc_client_type.to_string());
        map.insert("version_code", &self.version_code);
        map.insert("version_name", &self.version_name);
        map.insert("cookie_enabled", &self.cookie_enabled);
        map.insert("screen_width", self.screen_width.to_string());
        map.insert("screen_height", self.screen_height.to_string());
        map.insert("browser_language", &self.browser_language);
        map.insert("browser_platform", &self.browser_platform);
        map.insert("browser_name", &self.browser_name);
        map.insert("browser_version", &self.browser_version);
        map.insert("browser_online", &self.browser_online);
        map.insert("engine_name", &self.engine_name);
        map.insert("engine_version", &self.engine_version);
        map.insert("os_name", &self.os_name);
        map.insert("os_version", &self.os_version);
        map.insert("cpu_core_num", self.cpu_core_num.to_string());
        map.insert("device_memory", self.device_memory.to_string());
        map.insert("platform", &self.platform);
        map.insert("downlink", &self.downlink);
        map.insert("effective_type", &self.effective_type);
        map.insert("from_user_page", &self.from_user_page);
        map.insert("locate_query", &self.locate_query);
        map.insert("need_time_list", &self.need_time_list);
        map.insert("pc_libra_divert", &self.pc_libra_divert);
        map.insert(
            "publish_video_strategy_type",
            &self.publish_video_strategy_type,
        );
        map.insert("round_trip_time", &self.round_trip_time);
        map.insert("show_live_replay_strategy", &self.show_live_replay_strategy);
        map.insert("time_list_query", &self.time_list_query);
        map.insert("whale_cut_token", &self.whale_cut_token);
        map.insert("update_version_code", &self.update_version_code);
        map
    }
}

/// 需要签名的 Web 接口。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DouyinRequest {
    /// 单个作品详情。
    PostDetail {
        /// 作品 ID。
        aweme_id: String,
    },
    /// 精选推荐流。
    JingxuanFeed,
}

impl DouyinRequest {
    /// 该接口在公共字段之外追加的字段。
    #[must_use]
    pub fn extra_fields(&self) -> ParameterMap {
        let mut map = ParameterMap::new();
        match self {
            Self::PostDetail { aweme_id } => {
                map.insert("aweme_id", aweme_id);
            }
            Self::JingxuanFeed => {}
        }
        map
    }
}

/// 合并公共字段、接口字段与空的 `msToken`，得到最终参与签名的参数表。
#[must_use]
pub fn build_params(profile: &RequestProfile, request: &DouyinRequest) -> ParameterMap {
    let mut params = profile.to_params();
    params.extend(request.extra_fields().iter());
    params.insert("msToken", "");
    params
}

//! 负责加载与保存请求参数配置。
//!
//! 只有 [`RequestProfile`] 中的设备与浏览器字段可以配置；
//! 指纹、密钥、字母表等协议常量是固定的。

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, SignError};
use crate::model::RequestProfile;

/// 配置文件名。
pub const PROFILE_FILENAME: &str = "request_profile.toml";

/// 从 TOML 文本解析参数配置，缺省字段使用默认值。
pub fn parse_request_profile(content: &str) -> Result<RequestProfile> {
    Ok(toml::from_str(content)?)
}

/// 从指定路径加载参数配置。
pub fn load_request_profile_from(path: &Path) -> Result<RequestProfile> {
    let content = fs::read_to_string(path)?;
    parse_request_profile(&content)
}

/// 将参数配置写入指定路径。
pub fn save_request_profile_to(path: &Path, profile: &RequestProfile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(profile)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(feature = "dirs")]
pub(crate) mod native {
    use std::fs;
    use std::path::PathBuf;

    use crate::error::{Result, SignError};

    /// 获取应用配置目录下指定文件的完整路径。
    ///
    /// # 参数
    /// * `filename` - 目标配置文件的名称，例如 "`request_profile.toml`"。
    pub(crate) fn get_config_file_path(filename: &str) -> Result<PathBuf> {
        let mut config_dir = dirs::config_dir()
            .ok_or_else(|| SignError::Config("无法找到用户配置目录".into()))?;
        config_dir.push("douyin-sign");
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    }
}

/// 从指定路径加载参数配置，文件不存在时返回默认配置。
pub fn load_request_profile_or_default(path: &Path) -> Result<RequestProfile> {
    match load_request_profile_from(path) {
        Ok(profile) => {
            info!("已加载请求参数配置。");
            Ok(profile)
        }
        Err(SignError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("未找到请求参数配置文件，使用默认参数。");
            Ok(RequestProfile::default())
        }
        Err(e) => {
            warn!("加载请求参数配置失败: {e}");
            Err(e)
        }
    }
}

/// 从用户配置目录加载参数配置。
///
/// 配置文件不存在时返回默认配置。
#[cfg(feature = "dirs")]
pub fn load_request_profile() -> Result<RequestProfile> {
    let path = native::get_config_file_path(PROFILE_FILENAME)?;
    load_request_profile_or_default(&path)
}

#[cfg(not(feature = "dirs"))]
pub fn load_request_profile() -> Result<RequestProfile> {
    info!("未启用配置目录支持，使用默认参数。");
    Ok(RequestProfile::default())
}

/// 将参数配置保存到用户配置目录。
#[cfg(feature = "dirs")]
pub fn save_request_profile(profile: &RequestProfile) -> Result<()> {
    let path = native::get_config_file_path(PROFILE_FILENAME)?;
    save_request_profile_to(&path, profile)?;
    info!("请求参数配置已保存。");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let profile = parse_request_profile(
            r#"
            browser_version = "131.0.0.0"
            cpu_core_num = 16
            "#,
        )
        .unwrap();

        assert_eq!(profile.browser_version, "131.0.0.0");
        assert_eq!(profile.cpu_core_num, 16);
        assert_eq!(profile.aid, "6383");
        assert_eq!(profile.update_version_code, "170400");
    }

    #[test]
    fn test_invalid_profile() {
        let result = parse_request_profile("cpu_core_num = \"many\"");
        assert!(matches!(result, Err(SignError::TomlDe(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("douyin-sign-test-{}", std::process::id()));
        let path = dir.join(PROFILE_FILENAME);

        let profile = RequestProfile {
            os_version: "11".into(),
            ..RequestProfile::default()
        };
        save_request_profile_to(&path, &profile).unwrap();
        let loaded = load_request_profile_from(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_request_profile_from(Path::new("/nonexistent/douyin-sign/none.toml"));
        assert!(matches!(result, Err(SignError::Io(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = std::env::temp_dir()
            .join(format!("douyin-sign-missing-{}", std::process::id()))
            .join(PROFILE_FILENAME);
        assert!(!path.exists());

        let profile = load_request_profile_or_default(&path).unwrap();
        assert_eq!(profile, RequestProfile::default());
    }

    #[test]
    fn test_broken_file_is_not_replaced_by_default() {
        let dir = std::env::temp_dir().join(format!("douyin-sign-broken-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(PROFILE_FILENAME);
        fs::write(&path, "cpu_core_num = \"many\"").unwrap();

        let result = load_request_profile_or_default(&path);
        let _ = fs::remove_dir_all(&dir);

        assert!(matches!(result, Err(SignError::TomlDe(_))));
    }
}

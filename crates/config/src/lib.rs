//! tpa-config - 配置加载库

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 生产环境使用 JSON 日志
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// 策略种子文件配置
///
/// 未给出路径时使用内置目录 (等价于打包进二进制的 seed 数据)。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicySettings {
    /// 角色互斥矩阵 (exclusive + pairs) JSON 文件
    #[serde(default)]
    pub conflict_matrix: Option<PathBuf>,
    /// 角色目录 (policy tag / operational 集合) JSON 文件
    #[serde(default)]
    pub role_catalog: Option<PathBuf>,
    /// 角色权限模板 JSON 文件
    #[serde(default)]
    pub role_templates: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub policy: PolicySettings,
}

/// 加载配置
///
/// 优先级: 环境变量 (TPA_ 前缀) > TOML 文件 > 默认值。
/// 文件路径可用 TPA_CONFIG 覆盖，默认 config.toml。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var("TPA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("TPA_").split("__"))
        .extract()?;

    Ok(config)
}

// ==========================================
// 生产工单管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、快照
// 存储: JSON 文件（key → value,值统一按字符串保存）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::workflow_config_trait::WorkflowConfigReader;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const YIELD_THRESHOLD: &str = "yield.threshold";
    pub const WORKORDER_ALLOW_OVERNIGHT: &str = "workorder.allow_overnight";
    pub const WORKORDER_UNIQUE_ORDER_ID: &str = "workorder.unique_order_id";
    pub const MATERIAL_REQUIRE_STOCK_CODE: &str = "material.require_stock_code_for_mapping";
    pub const LOCALE: &str = "locale";
}

/// 默认良率阈值
pub const DEFAULT_YIELD_THRESHOLD: f64 = 0.8;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 默认配置目录名（位于系统配置目录下）
const CONFIG_DIR_NAME: &str = "production-workorder";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值对创建
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 默认配置文件路径: <config_dir>/production-workorder/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 从默认路径加载; 文件不存在时使用默认配置
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            Some(path) => {
                tracing::info!(path = %path.display(), "配置文件不存在，使用默认配置");
                Ok(Self::new())
            }
            None => {
                tracing::warn!("无法确定系统配置目录，使用默认配置");
                Ok(Self::new())
            }
        }
    }

    /// 从 JSON 文件加载
    ///
    /// # 文件格式
    /// 顶层为对象; 值可以是字符串、数字或布尔,统一转为字符串保存
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let manager = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            keys = manager.values.len(),
            "配置加载完成"
        );
        Ok(manager)
    }

    /// 保存为 JSON 文件（父目录不存在时自动创建）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.get_config_snapshot()?)?;
        Ok(())
    }

    fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or_else(|| {
            ConfigError::FormatError("配置顶层必须为 JSON 对象".to_string())
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ConfigError::ValueError {
                        key: key.clone(),
                        value: other.to_string(),
                        message: "仅支持字符串/数字/布尔值".to_string(),
                    })
                }
            };
            values.insert(key.clone(), text);
        }

        Ok(Self { values })
    }

    /// 读取配置值
    pub fn get_global_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 覆写配置值
    pub fn set_config_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        tracing::debug!(config_key = %key, value = %value, "覆写配置");
        self.values.insert(key, value);
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    /// 从配置快照恢复（整体替换当前配置）
    pub fn restore_from_snapshot(&mut self, snapshot_json: &str) -> ConfigResult<()> {
        let restored = Self::from_json_str(snapshot_json)?;
        self.values = restored.values;
        Ok(())
    }

    fn get_config_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_global_config_value(key).unwrap_or(default)
    }

    fn get_bool_or_default(&self, key: &str, default: bool) -> bool {
        match self.get_global_config_value(key) {
            None => default,
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    tracing::warn!(config_key = key, raw_value = %raw, "布尔配置格式错误，使用默认值");
                    default
                }
            },
        }
    }
}

// ==========================================
// WorkflowConfigReader Trait 实现
// ==========================================
impl WorkflowConfigReader for ConfigManager {
    fn get_yield_threshold(&self) -> f64 {
        let raw = self.get_config_or_default(config_keys::YIELD_THRESHOLD, "0.8");
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                tracing::warn!(
                    config_key = config_keys::YIELD_THRESHOLD,
                    raw_value = %raw,
                    "良率阈值配置无效，使用默认值"
                );
                DEFAULT_YIELD_THRESHOLD
            }
        }
    }

    fn allow_overnight_work_order(&self) -> bool {
        self.get_bool_or_default(config_keys::WORKORDER_ALLOW_OVERNIGHT, false)
    }

    fn require_unique_order_id(&self) -> bool {
        self.get_bool_or_default(config_keys::WORKORDER_UNIQUE_ORDER_ID, false)
    }

    fn require_stock_code_for_mapping(&self) -> bool {
        self.get_bool_or_default(config_keys::MATERIAL_REQUIRE_STOCK_CODE, false)
    }

    fn get_locale(&self) -> String {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::new();
        assert_eq!(config.get_yield_threshold(), DEFAULT_YIELD_THRESHOLD);
        assert!(!config.allow_overnight_work_order());
        assert!(!config.require_unique_order_id());
        assert!(!config.require_stock_code_for_mapping());
        assert_eq!(config.get_locale(), "zh-CN");
    }

    #[test]
    fn test_invalid_threshold_falls_back_to_default() {
        let config = ConfigManager::from_pairs([(config_keys::YIELD_THRESHOLD, "abc")]);
        assert_eq!(config.get_yield_threshold(), DEFAULT_YIELD_THRESHOLD);

        let config = ConfigManager::from_pairs([(config_keys::YIELD_THRESHOLD, "-0.5")]);
        assert_eq!(config.get_yield_threshold(), DEFAULT_YIELD_THRESHOLD);
    }

    #[test]
    fn test_bool_parsing() {
        let config = ConfigManager::from_pairs([
            (config_keys::WORKORDER_ALLOW_OVERNIGHT, "TRUE"),
            (config_keys::WORKORDER_UNIQUE_ORDER_ID, "1"),
            (config_keys::MATERIAL_REQUIRE_STOCK_CODE, "maybe"),
        ]);
        assert!(config.allow_overnight_work_order());
        assert!(config.require_unique_order_id());
        assert!(!config.require_stock_code_for_mapping());
    }

    #[test]
    fn test_json_values_are_stringified() {
        let config = ConfigManager::from_json_str(
            r#"{"yield.threshold": 0.75, "workorder.allow_overnight": true, "locale": "en"}"#,
        )
        .unwrap();
        assert_eq!(config.get_yield_threshold(), 0.75);
        assert!(config.allow_overnight_work_order());
        assert_eq!(config.get_locale(), "en");
    }

    #[test]
    fn test_nested_value_rejected() {
        let result = ConfigManager::from_json_str(r#"{"yield.threshold": {"v": 1}}"#);
        match result {
            Err(ConfigError::ValueError { key, .. }) => assert_eq!(key, "yield.threshold"),
            other => panic!("Expected ValueError, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_restore() {
        let mut config = ConfigManager::from_pairs([(config_keys::YIELD_THRESHOLD, "0.9")]);
        let snapshot = config.get_config_snapshot().unwrap();

        config.set_config_value(config_keys::YIELD_THRESHOLD, "0.5");
        assert_eq!(config.get_yield_threshold(), 0.5);

        config.restore_from_snapshot(&snapshot).unwrap();
        assert_eq!(config.get_yield_threshold(), 0.9);
    }
}

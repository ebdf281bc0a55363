// ==========================================
// 生产工单管理系统 - 配置层
// ==========================================
// 职责: 良率阈值与校验策略开关的加载与读取
// 存储: JSON 文件（默认位于系统配置目录）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod workflow_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_LOCALE, DEFAULT_YIELD_THRESHOLD};
pub use error::{ConfigError, ConfigResult};
pub use workflow_config_trait::WorkflowConfigReader;

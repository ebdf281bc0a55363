// ==========================================
// 生产与工单管理系统 - 核心库
// ==========================================
// 范围: 记录校验规则 + 派生指标（良率/生产率）+ 会话记录存储
// 说明: 文件解析与界面展示由外部展示层负责
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 会话内记录表
pub mod repository;

// 引擎层 - 准入规则与指标
pub mod engine;

// 导入层 - 外部表格数据
pub mod importer;

// 配置层 - 阈值与策略开关
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 提交接口
pub mod api;

// 应用层 - 会话与隔离
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ProductVerificationEntry, ProductionTrackingEntry, RawMaterialRecord, StockProductMapping,
    TabularData, WorkOrder,
};

// 领域报告与类型
pub use domain::{
    ImportSummary, MaterialEntryReceipt, ProcessedMaterialSummary, ProductivityReport,
    TableKind, YieldOutcome, YieldReport,
};

// 存储与引擎
pub use engine::{MetricsEngine, ValidationRules};
pub use repository::RecordStore;

// API 与会话
pub use api::{ApiError, ApiResult, WorkflowApi};
pub use app::{AppState, Session};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产与工单管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

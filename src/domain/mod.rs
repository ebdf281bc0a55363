// ==========================================
// 生产工单管理系统 - 领域模型层
// ==========================================
// 职责: 定义记录实体、表格数据、报告与类型
// 红线: 不含存储逻辑,不含校验与指标逻辑
// ==========================================

pub mod import;
pub mod records;
pub mod report;
pub mod tabular;
pub mod types;

// 重导出核心类型
pub use import::{DqLevel, DqSummary, DqViolation, ImportSummary};
pub use records::{
    ProductVerificationEntry, ProductionTrackingEntry, RawMaterialRecord, StockProductMapping,
    WorkOrder, MANUAL_ENTRY_COLUMN,
};
pub use report::{MaterialEntryReceipt, ProcessedMaterialSummary, ProductivityReport, YieldReport};
pub use tabular::{TabularData, BARCODE_COLUMN};
pub use types::{TableKind, YieldOutcome};

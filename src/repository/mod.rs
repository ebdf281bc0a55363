// ==========================================
// 生产工单管理系统 - 数据仓储层
// ==========================================
// 职责: 会话内记录表的内存存储
// 红线: 不含校验逻辑,不含指标计算,不做持久化
// ==========================================

pub mod error;
pub mod record_store;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use record_store::{RecordStore, StoreSnapshot, Table};

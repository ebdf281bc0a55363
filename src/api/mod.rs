// ==========================================
// 生产工单管理系统 - API 层
// ==========================================
// 职责: 对外提交接口,串联校验规则、指标引擎与记录存储
// ==========================================

pub mod error;
pub mod workflow_api;

// 重导出
pub use error::{ApiError, ApiResult, ErrorKind};
pub use workflow_api::WorkflowApi;

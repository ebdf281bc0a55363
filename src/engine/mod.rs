// ==========================================
// 生产工单管理系统 - 引擎层
// ==========================================
// 职责: 准入校验规则 + 派生指标计算
// 红线: 引擎只读记录存储,追加由 API 层在全部校验通过后执行
// ==========================================

pub mod clock;
pub mod error;
pub mod metrics;
pub mod validation;

// 重导出核心引擎
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EngineError, EngineResult};
pub use metrics::{MetricsEngine, ProductivityMetric, YieldMetric};
pub use validation::{AdmissionPolicy, MaterialEntryAdmission, ValidationRules};

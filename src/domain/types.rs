// ==========================================
// 生产工单管理系统 - 领域类型定义
// ==========================================
// 职责: 表标识、指标判定结果等枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 记录表标识 (Table Kind)
// ==========================================
// 会话内五张只追加表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    RawMaterials,         // 原材料
    ProductionTracking,   // 生产跟踪
    StockProductMapping,  // 库存编码-产品映射
    ProductVerification,  // 产品校验
    WorkOrders,           // 工单
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::RawMaterials => write!(f, "RAW_MATERIALS"),
            TableKind::ProductionTracking => write!(f, "PRODUCTION_TRACKING"),
            TableKind::StockProductMapping => write!(f, "STOCK_PRODUCT_MAPPING"),
            TableKind::ProductVerification => write!(f, "PRODUCT_VERIFICATION"),
            TableKind::WorkOrders => write!(f, "WORK_ORDERS"),
        }
    }
}

// ==========================================
// 良率判定结果 (Yield Outcome)
// ==========================================
// 两种结果都只是报告,不视为失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YieldOutcome {
    Acceptable,     // 达标 (yield >= threshold)
    BelowThreshold, // 低于阈值
}

impl fmt::Display for YieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YieldOutcome::Acceptable => write!(f, "ACCEPTABLE"),
            YieldOutcome::BelowThreshold => write!(f, "BELOW_THRESHOLD"),
        }
    }
}

// ==========================================
// 生产工单管理系统 - 原材料导入领域模型
// ==========================================
// 职责: 导入批次摘要与数据质量(DQ)报告结构
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
// 原材料整表导入,不逐行阻断; 级别只用于报告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Warning, // 警告（如条码为空）
    Info,    // 提示（如条码重复）
}

// ==========================================
// DqViolation - 数据质量记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,       // 数据行号（从 1 开始,不含表头）
    pub barcode: Option<String>, // 条码（如果可解析）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub warning: usize,
    pub info: usize,
}

// ==========================================
// ImportSummary - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String, // 批次 ID（UUID）
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
    pub elapsed_ms: u64,
}

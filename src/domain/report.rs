// ==========================================
// 生产工单管理系统 - 提交结果与指标报告
// ==========================================
// 用途: 各提交接口的成功返回值,供展示层直接呈现
// ==========================================

use crate::domain::types::YieldOutcome;
use serde::{Deserialize, Serialize};

// ==========================================
// MaterialEntryReceipt - 原材料录入回执
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntryReceipt {
    pub raw_material_index: usize,      // 新记录在原材料表中的下标
    pub mapping_index: Option<usize>,   // 若同时创建了映射,映射表下标
    pub message: String,
}

// ==========================================
// ProcessedMaterialSummary - 加工结果摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMaterialSummary {
    pub bulk_material_barcode: String,
    pub processed_material: String,
    pub waste_factor: f64,
    pub message: String,
}

// ==========================================
// YieldReport - 良率报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldReport {
    pub product: String,
    pub associated_raw_material: String,
    pub matched_raw_materials: usize, // 分子: 条码匹配的原材料行数
    pub production_entries: usize,    // 分母: 生产跟踪记录数
    pub yield_ratio: f64,
    pub threshold: f64,
    pub outcome: YieldOutcome,
    pub message: String,
}

impl YieldReport {
    /// 百分比形式（保留原始精度,展示时再格式化）
    pub fn yield_percentage(&self) -> f64 {
        self.yield_ratio * 100.0
    }

    pub fn is_acceptable(&self) -> bool {
        self.outcome == YieldOutcome::Acceptable
    }
}

// ==========================================
// ProductivityReport - 生产率报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityReport {
    pub order_id: String,
    pub matched_units: usize,   // 首行条码匹配数
    pub elapsed_seconds: i64,
    pub units_per_second: f64,
    pub message: String,
}

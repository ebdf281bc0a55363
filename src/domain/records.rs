// ==========================================
// 生产工单管理系统 - 记录实体
// ==========================================
// 职责: 五张记录表的强类型行结构
// 红线: 只读结构,不含校验逻辑（校验见 engine::validation）
// ==========================================

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 人工录入数据在原材料记录中的列名
pub const MANUAL_ENTRY_COLUMN: &str = "Manual_Entry";

// ==========================================
// RawMaterialRecord - 原材料记录
// ==========================================
// 用途: 物料身份的唯一事实来源,整表导入,不逐行校验
// 供应商自定义列按列名存入 attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialRecord {
    pub barcode: String,                        // 条码（Barcode 列）
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,   // 供应商自定义列
}

impl RawMaterialRecord {
    pub fn new(barcode: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// 人工录入生成的记录: {Barcode, Manual_Entry}
    pub fn manual(barcode: impl Into<String>, manual_entry: impl Into<String>) -> Self {
        let mut record = Self::new(barcode);
        record
            .attributes
            .insert(MANUAL_ENTRY_COLUMN.to_string(), manual_entry.into());
        record
    }

    pub fn with_attribute(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(column.into(), value.into());
        self
    }

    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }
}

// ==========================================
// ProductionTrackingEntry - 生产跟踪记录（阶段1）
// ==========================================
// 不变量: waste_factor >= 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTrackingEntry {
    pub bulk_material_barcode: String, // 散装物料条码
    pub processed_material: String,    // 加工后物料（当前为条码本身）
    pub waste_factor: f64,             // 损耗系数
}

// ==========================================
// StockProductMapping - 库存编码-产品映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProductMapping {
    pub stock_code: String,
    pub product: String,
}

// ==========================================
// ProductVerificationEntry - 产品校验记录
// ==========================================
// 关联原材料按条码引用,引用完整性不强制
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVerificationEntry {
    pub product: String,
    pub associated_raw_material: String,
}

// ==========================================
// WorkOrder - 工单
// ==========================================
// 前置条件: 存在匹配的 ProductVerificationEntry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub order_id: String,
    pub product: String,
    pub operator: String,
    pub start_time: NaiveTime, // 开始时刻（当日时间）
    pub end_time: NaiveTime,   // 结束时刻（当日时间）
}

// ==========================================
// 生产工单管理系统 - 数据质量校验器
// ==========================================
// 职责: 原材料导入的 DQ 检查与汇总
// 红线: 只报告不阻断（原材料整表导入,不逐行校验）
// ==========================================

use crate::domain::import::{DqLevel, DqSummary, DqViolation};
use crate::importer::field_mapper::MappedRow;
use std::collections::HashMap;

pub struct DqValidator;

impl DqValidator {
    /// 条码检查
    ///
    /// - 条码为空 → WARNING（该行无法被任何条码查找命中）
    /// - 条码重复 → INFO（重复条码计入良率/生产率匹配数）
    pub fn validate_barcodes(rows: &[MappedRow]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut first_occurrence: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let barcode = row.record.barcode.as_str();
            if barcode.is_empty() {
                violations.push(DqViolation {
                    row_number: row.row_number,
                    barcode: None,
                    level: DqLevel::Warning,
                    field: "barcode".to_string(),
                    message: "条码为空".to_string(),
                });
                continue;
            }

            match first_occurrence.get(barcode) {
                Some(first_row) => violations.push(DqViolation {
                    row_number: row.row_number,
                    barcode: Some(barcode.to_string()),
                    level: DqLevel::Info,
                    field: "barcode".to_string(),
                    message: format!("条码重复（首次出现于第 {} 行）", first_row),
                }),
                None => {
                    first_occurrence.insert(barcode, row.row_number);
                }
            }
        }

        violations
    }

    /// 生成汇总
    pub fn summarize(total_rows: usize, imported: usize, violations: &[DqViolation]) -> DqSummary {
        DqSummary {
            total_rows,
            imported,
            warning: violations
                .iter()
                .filter(|v| matches!(v.level, DqLevel::Warning))
                .count(),
            info: violations
                .iter()
                .filter(|v| matches!(v.level, DqLevel::Info))
                .count(),
        }
    }
}

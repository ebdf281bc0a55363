// ==========================================
// 生产工单管理系统 - 字段映射器
// ==========================================
// 职责: TabularData 行 → RawMaterialRecord
// 规则: Barcode 列（含别名）映射为条码,其余列原样保存为供应商属性
// ==========================================

use crate::domain::records::RawMaterialRecord;
use crate::domain::tabular::{TabularData, BARCODE_COLUMN};
use crate::importer::error::{ImportError, ImportResult};

/// 条码列别名（按优先级）
const BARCODE_ALIASES: &[&str] = &[BARCODE_COLUMN, "barcode", "BARCODE", "条码"];

/// 映射后的原材料行（带原始行号,供 DQ 报告使用）
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    pub row_number: usize, // 数据行号（从 1 开始）
    pub record: RawMaterialRecord,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 定位条码列
    pub fn locate_barcode_column(table: &TabularData) -> Option<usize> {
        BARCODE_ALIASES
            .iter()
            .find_map(|alias| table.column_index(alias))
    }

    /// 整表映射
    ///
    /// # 规则
    /// - 无数据行: 返回空列表（即清空原材料表）
    /// - 有数据行但无条码列: MissingColumn
    /// - 完全空白的行跳过
    /// - 属性列名与单元格值去首尾空白; 空表头列忽略
    pub fn map_table(table: &TabularData) -> ImportResult<Vec<MappedRow>> {
        if table.is_empty() {
            return Ok(Vec::new());
        }
        if table.headers.is_empty() {
            return Err(ImportError::EmptyHeader);
        }

        let barcode_col = Self::locate_barcode_column(table)
            .ok_or_else(|| ImportError::MissingColumn(BARCODE_COLUMN.to_string()))?;

        let mut mapped = Vec::with_capacity(table.row_count());
        for (idx, row) in table.rows.iter().enumerate() {
            // 跳过完全空白的行
            if row.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            let barcode = table.cell(idx, barcode_col).unwrap_or("").trim();
            let mut record = RawMaterialRecord::new(barcode);

            for (col_idx, header) in table.headers.iter().enumerate() {
                let header = header.trim();
                if col_idx == barcode_col || header.is_empty() {
                    continue;
                }
                if let Some(value) = row.get(col_idx) {
                    record
                        .attributes
                        .insert(header.to_string(), value.trim().to_string());
                }
            }

            mapped.push(MappedRow {
                row_number: idx + 1,
                record,
            });
        }

        Ok(mapped)
    }
}

// ==========================================
// 生产工单管理系统 - 原材料导入器
// ==========================================
// 职责: 字段映射 + DQ 检查 + 批次信息
// 红线: 不写记录存储; 整表替换由 API 层在导入成功后执行
// ==========================================

use crate::domain::import::ImportSummary;
use crate::domain::records::RawMaterialRecord;
use crate::domain::tabular::TabularData;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// 已准备好的导入结果（待替换进记录存储）
#[derive(Debug, Clone)]
pub struct PreparedImport {
    pub records: Vec<RawMaterialRecord>,
    pub summary: ImportSummary,
}

pub struct RawMaterialImporter;

impl RawMaterialImporter {
    /// 准备导入
    ///
    /// # 流程
    /// 1. 字段映射（缺少 Barcode 列则整表拒绝）
    /// 2. DQ 检查（只报告）
    /// 3. 生成批次 ID 与汇总
    pub fn prepare(table: &TabularData) -> ImportResult<PreparedImport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        // === 步骤 1: 字段映射 ===
        let mapped = FieldMapper::map_table(table).inspect_err(|e| {
            warn!(batch_id = %batch_id, error = %e, "原材料表映射失败");
        })?;

        // === 步骤 2: DQ 检查 ===
        let violations = DqValidator::validate_barcodes(&mapped);
        let summary = DqValidator::summarize(table.row_count(), mapped.len(), &violations);

        let records: Vec<RawMaterialRecord> = mapped.into_iter().map(|m| m.record).collect();
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            batch_id = %batch_id,
            total_rows = summary.total_rows,
            imported = summary.imported,
            warning = summary.warning,
            info = summary.info,
            elapsed_ms,
            "原材料导入准备完成"
        );

        Ok(PreparedImport {
            records,
            summary: ImportSummary {
                batch_id,
                summary,
                violations,
                elapsed_ms,
            },
        })
    }
}

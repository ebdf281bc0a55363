// ==========================================
// 生产工单管理系统 - 工作流 API
// ==========================================
// 职责: 原材料导入、录入、生产跟踪、产品校验、工单签发
// 红线: 先完成全部校验与指标计算,再追加记录; 任何错误不修改存储
// ==========================================

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::workflow_config_trait::WorkflowConfigReader;
use crate::domain::import::ImportSummary;
use crate::domain::report::{
    MaterialEntryReceipt, ProcessedMaterialSummary, ProductivityReport, YieldReport,
};
use crate::domain::types::YieldOutcome;
use crate::engine::clock::Clock;
use crate::engine::metrics::MetricsEngine;
use crate::engine::validation::{AdmissionPolicy, ValidationRules};
use crate::i18n;
use crate::importer::raw_material_importer::RawMaterialImporter;
use crate::domain::tabular::TabularData;
use crate::repository::record_store::RecordStore;

// ==========================================
// WorkflowApi - 工作流 API
// ==========================================

/// 工作流API
///
/// 职责：
/// 1. 调用 ValidationRules 完成准入判定
/// 2. 调用 MetricsEngine 计算良率/生产率
/// 3. 全部通过后追加到会话的 RecordStore
/// 4. 生成带本地化消息的报告
pub struct WorkflowApi {
    config: Arc<dyn WorkflowConfigReader>,
    clock: Arc<dyn Clock>,
}

impl WorkflowApi {
    /// 创建新的WorkflowApi实例
    ///
    /// # 参数
    /// - config: 配置读取器（阈值与策略开关）
    /// - clock: 日历时钟（生产率计算取当天日期）
    pub fn new(config: Arc<dyn WorkflowConfigReader>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    fn policy(&self) -> AdmissionPolicy {
        AdmissionPolicy {
            require_stock_code_for_mapping: self.config.require_stock_code_for_mapping(),
            unique_order_id: self.config.require_unique_order_id(),
        }
    }

    fn message(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::t_in(&self.config.get_locale(), key, args)
    }

    // ==========================================
    // 原材料导入
    // ==========================================

    /// 原材料整表导入（替换）
    ///
    /// # 返回
    /// - Ok(ImportSummary): 批次 ID + DQ 报告
    /// - Err(ApiError::ImportError): 表结构不合法,原材料表保持不变
    #[instrument(skip(self, store, table), fields(rows = table.row_count()))]
    pub fn import_raw_materials(
        &self,
        store: &mut RecordStore,
        table: &TabularData,
    ) -> ApiResult<ImportSummary> {
        let prepared = RawMaterialImporter::prepare(table)?;
        let previous = store.replace_raw_materials(prepared.records);

        info!(
            batch_id = %prepared.summary.batch_id,
            previous,
            imported = prepared.summary.summary.imported,
            "原材料表已替换"
        );
        Ok(prepared.summary)
    }

    // ==========================================
    // 原材料/人工录入
    // ==========================================

    /// 录入原材料（条码或人工数据）,可附带产品关联
    #[instrument(skip(self, store))]
    pub fn submit_material_entry(
        &self,
        store: &mut RecordStore,
        barcode: &str,
        manual_entry: &str,
        product_association: &str,
    ) -> ApiResult<MaterialEntryReceipt> {
        let admission = ValidationRules::admit_material_entry(
            barcode,
            manual_entry,
            product_association,
            self.policy(),
        )
        .inspect_err(|e| warn!(error = %e, "原材料录入被拒绝"))?;

        let message = match &admission.mapping {
            Some(mapping) => self.message(
                "material.mapping_added",
                &[
                    ("stock_code", mapping.stock_code.as_str()),
                    ("product", mapping.product.as_str()),
                ],
            ),
            None => self.message("material.added", &[]),
        };

        let raw_material_index = store.append_raw_material(admission.record);
        let mapping_index = admission
            .mapping
            .map(|mapping| store.append_stock_product_mapping(mapping));

        info!(raw_material_index, ?mapping_index, "原材料录入成功");
        Ok(MaterialEntryReceipt {
            raw_material_index,
            mapping_index,
            message,
        })
    }

    // ==========================================
    // 生产跟踪（阶段1）
    // ==========================================

    #[instrument(skip(self, store))]
    pub fn submit_production_tracking(
        &self,
        store: &mut RecordStore,
        bulk_material: &str,
        waste_factor: Option<f64>,
    ) -> ApiResult<ProcessedMaterialSummary> {
        let entry = ValidationRules::admit_production_tracking(bulk_material, waste_factor)
            .inspect_err(|e| warn!(error = %e, "生产跟踪被拒绝"))?;

        let message = self.message(
            "production.tracked",
            &[
                ("processed", entry.processed_material.as_str()),
                ("waste", entry.waste_factor.to_string().as_str()),
            ],
        );
        let summary = ProcessedMaterialSummary {
            bulk_material_barcode: entry.bulk_material_barcode.clone(),
            processed_material: entry.processed_material.clone(),
            waste_factor: entry.waste_factor,
            message,
        };

        let index = store.append_production_tracking(entry);
        info!(index, "生产跟踪记录成功");
        Ok(summary)
    }

    // ==========================================
    // 产品校验 + 良率
    // ==========================================

    /// 产品校验
    ///
    /// # 流程
    /// 1. 字段准入
    /// 2. 良率计算（无匹配原材料 → MissingReference; 无生产记录 → UndefinedMetric）
    /// 3. 通过后追加校验记录
    ///
    /// BELOW_THRESHOLD 只作为报告结果,不拒绝提交
    #[instrument(skip(self, store))]
    pub fn submit_product_verification(
        &self,
        store: &mut RecordStore,
        product_name: &str,
        associated_raw_material: &str,
    ) -> ApiResult<YieldReport> {
        let entry = ValidationRules::admit_product_verification(product_name, associated_raw_material)
            .inspect_err(|e| warn!(error = %e, "产品校验被拒绝"))?;

        let threshold = self.config.get_yield_threshold();
        let metric = MetricsEngine::compute_yield(store, &entry.associated_raw_material, threshold)
            .inspect_err(|e| warn!(error = %e, "良率计算失败，产品校验未记录"))?;

        let percentage = format!("{:.2}", metric.ratio * 100.0);
        let message_key = match metric.outcome {
            YieldOutcome::Acceptable => "verification.yield_acceptable",
            YieldOutcome::BelowThreshold => "verification.yield_below",
        };
        let report = YieldReport {
            product: entry.product.clone(),
            associated_raw_material: entry.associated_raw_material.clone(),
            matched_raw_materials: metric.matched_raw_materials,
            production_entries: metric.production_entries,
            yield_ratio: metric.ratio,
            threshold: metric.threshold,
            outcome: metric.outcome,
            message: self.message(message_key, &[("percentage", percentage.as_str())]),
        };

        let index = store.append_product_verification(entry);
        match report.outcome {
            YieldOutcome::Acceptable => {
                info!(index, yield_ratio = report.yield_ratio, "产品校验成功，良率达标")
            }
            YieldOutcome::BelowThreshold => {
                warn!(index, yield_ratio = report.yield_ratio, threshold, "产品校验成功，良率低于阈值")
            }
        }
        Ok(report)
    }

    // ==========================================
    // 工单签发 + 生产率
    // ==========================================

    /// 签发工单
    ///
    /// # 流程
    /// 1. 工单准入（字段齐全 + 产品已校验关联首行原材料）
    /// 2. 生产率计算（耗时为 0 → UndefinedMetric; 结束早于开始 → 校验失败,除非允许跨零点）
    /// 3. 通过后追加工单
    #[instrument(skip(self, store))]
    pub fn submit_work_order(
        &self,
        store: &mut RecordStore,
        order_id: &str,
        product: &str,
        operator: &str,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> ApiResult<ProductivityReport> {
        let order = ValidationRules::admit_work_order(
            store,
            order_id,
            product,
            operator,
            start_time,
            end_time,
            self.policy(),
        )
        .inspect_err(|e| warn!(error = %e, "工单被拒绝"))?;

        let metric = MetricsEngine::compute_productivity(
            store,
            order.start_time,
            order.end_time,
            self.clock.today(),
            self.config.allow_overnight_work_order(),
        )
        .inspect_err(|e| warn!(error = %e, "生产率计算失败，工单未签发"))?;

        let rate = format!("{:.2}", metric.units_per_second);
        let report = ProductivityReport {
            order_id: order.order_id.clone(),
            matched_units: metric.matched_units,
            elapsed_seconds: metric.elapsed_seconds,
            units_per_second: metric.units_per_second,
            message: self.message("work_order.productivity", &[("rate", rate.as_str())]),
        };

        let index = store.append_work_order(order);
        info!(
            index,
            order_id = %report.order_id,
            units_per_second = report.units_per_second,
            "工单签发成功"
        );
        Ok(report)
    }

    /// 导出会话存储快照（JSON）
    pub fn snapshot_json(&self, store: &RecordStore) -> ApiResult<String> {
        store.snapshot_json().map_err(ApiError::from)
    }
}

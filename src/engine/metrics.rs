// ==========================================
// 生产工单管理系统 - 指标引擎
// ==========================================
// 职责: 良率（产品校验后）与生产率（工单签发后）计算
// 红线: 纯函数,只读记录存储; 所有除法先检查分母
// ==========================================

use crate::domain::types::{TableKind, YieldOutcome};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::record_store::RecordStore;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const METRIC_YIELD: &str = "yield";
pub const METRIC_PRODUCTIVITY: &str = "productivity";

// ==========================================
// YieldMetric - 良率计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldMetric {
    pub matched_raw_materials: usize,
    pub production_entries: usize,
    pub ratio: f64,
    pub threshold: f64,
    pub outcome: YieldOutcome,
}

// ==========================================
// ProductivityMetric - 生产率计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityMetric {
    pub matched_units: usize,
    pub elapsed_seconds: i64,
    pub units_per_second: f64,
}

// ==========================================
// MetricsEngine - 指标引擎
// ==========================================
pub struct MetricsEngine;

impl MetricsEngine {
    /// 良率计算
    ///
    /// # 规则
    /// 1. 选出 Barcode == associated_raw_material 的原材料行
    /// 2. 无匹配 → MissingReference
    /// 3. yield = 匹配行数 / 生产跟踪记录数; 记录数为 0 → UndefinedMetric
    /// 4. yield >= threshold → ACCEPTABLE, 否则 BELOW_THRESHOLD
    #[instrument(skip(store), fields(raw_material = %associated_raw_material))]
    pub fn compute_yield(
        store: &RecordStore,
        associated_raw_material: &str,
        threshold: f64,
    ) -> EngineResult<YieldMetric> {
        let matched = store.count_raw_materials_by_barcode(associated_raw_material);
        if matched == 0 {
            return Err(EngineError::MissingReference {
                table: TableKind::RawMaterials,
                key: associated_raw_material.to_string(),
                reason: "未找到与该产品关联的原材料".to_string(),
            });
        }

        let production_entries = store.production_tracking().len();
        if production_entries == 0 {
            return Err(EngineError::UndefinedMetric {
                metric: METRIC_YIELD.to_string(),
                reason: "生产跟踪记录为空，良率分母为 0".to_string(),
            });
        }

        let ratio = matched as f64 / production_entries as f64;
        let outcome = Self::classify_yield(ratio, threshold);

        debug!(matched, production_entries, ratio, %outcome, "良率计算完成");

        Ok(YieldMetric {
            matched_raw_materials: matched,
            production_entries,
            ratio,
            threshold,
            outcome,
        })
    }

    /// 良率阈值判定
    pub fn classify_yield(ratio: f64, threshold: f64) -> YieldOutcome {
        if ratio >= threshold {
            YieldOutcome::Acceptable
        } else {
            YieldOutcome::BelowThreshold
        }
    }

    /// 工单耗时（秒）
    ///
    /// # 规则
    /// - 开始/结束时刻与 today 组合成两个时间点,取差值
    /// - 差值 < 0: allow_overnight 时结束时刻顺延到次日,否则 InvalidValue
    /// - 差值 == 0 交由调用方按 UndefinedMetric 处理
    pub fn elapsed_seconds(
        start_time: NaiveTime,
        end_time: NaiveTime,
        today: NaiveDate,
        allow_overnight: bool,
    ) -> EngineResult<i64> {
        let start = today.and_time(start_time);
        let mut end = today.and_time(end_time);

        if end < start {
            if !allow_overnight {
                return Err(EngineError::InvalidValue {
                    field: "end_time".to_string(),
                    message: format!("结束时间 {} 早于开始时间 {}", end_time, start_time),
                });
            }
            let next_day = today.succ_opt().ok_or_else(|| EngineError::InvalidValue {
                field: "end_time".to_string(),
                message: format!("日期 {} 无法顺延到次日", today),
            })?;
            end = next_day.and_time(end_time);
        }

        Ok((end - start).num_seconds())
    }

    /// 生产率计算
    ///
    /// # 规则
    /// 1. 计算工单耗时 elapsed_seconds
    /// 2. 统计与原材料表首行条码相同的行数（首行自引用计数）
    /// 3. productivity = 匹配数 / elapsed_seconds; elapsed == 0 → UndefinedMetric
    ///
    /// # 说明
    /// 工单准入已保证校验记录的关联原材料 == 首行条码,
    /// 因此首行计数与"该产品校验过的原材料"计数一致
    #[instrument(skip(store))]
    pub fn compute_productivity(
        store: &RecordStore,
        start_time: NaiveTime,
        end_time: NaiveTime,
        today: NaiveDate,
        allow_overnight: bool,
    ) -> EngineResult<ProductivityMetric> {
        let elapsed_seconds = Self::elapsed_seconds(start_time, end_time, today, allow_overnight)?;

        let first_barcode = store
            .first_raw_material()
            .map(|r| r.barcode.as_str())
            .map_err(|_| EngineError::MissingReference {
                table: TableKind::RawMaterials,
                key: "row 0".to_string(),
                reason: "原材料表为空，无法统计生产数量".to_string(),
            })?;
        let matched_units = store.count_raw_materials_by_barcode(first_barcode);

        if elapsed_seconds == 0 {
            return Err(EngineError::UndefinedMetric {
                metric: METRIC_PRODUCTIVITY.to_string(),
                reason: "开始时间与结束时间相同，耗时为 0".to_string(),
            });
        }

        let units_per_second = matched_units as f64 / elapsed_seconds as f64;
        debug!(matched_units, elapsed_seconds, units_per_second, "生产率计算完成");

        Ok(ProductivityMetric {
            matched_units,
            elapsed_seconds,
            units_per_second,
        })
    }
}

// ==========================================
// 生产工单管理系统 - 准入校验规则
// ==========================================
// 职责: 判定原材料录入/生产跟踪/产品校验/工单是否可准入
// 红线: 纯函数,只读记录存储,不做任何追加
// 约定: 去除首尾空白后为空即视为"空"; 准入值按去空白后保存
// ==========================================

use crate::domain::records::{
    ProductVerificationEntry, ProductionTrackingEntry, RawMaterialRecord, StockProductMapping,
    WorkOrder,
};
use crate::domain::types::TableKind;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::record_store::RecordStore;
use chrono::NaiveTime;

// ==========================================
// AdmissionPolicy - 准入策略开关
// ==========================================
// 默认值与原有宽松行为一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionPolicy {
    pub require_stock_code_for_mapping: bool, // 映射要求条码非空
    pub unique_order_id: bool,                // 工单号唯一
}

// ==========================================
// MaterialEntryAdmission - 原材料录入准入结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEntryAdmission {
    pub record: RawMaterialRecord,
    pub mapping: Option<StockProductMapping>,
}

// ==========================================
// ValidationRules - 准入规则（纯函数）
// ==========================================
pub struct ValidationRules;

impl ValidationRules {
    /// 去除首尾空白后是否为空
    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }

    /// 原材料/人工录入准入
    ///
    /// # 规则
    /// - barcode 与 manual_entry 至少一个非空
    /// - product_association 非空时同时生成映射,库存编码取 barcode（可能为空串）
    /// - policy.require_stock_code_for_mapping 打开时,映射要求 barcode 非空
    pub fn admit_material_entry(
        barcode: &str,
        manual_entry: &str,
        product_association: &str,
        policy: AdmissionPolicy,
    ) -> EngineResult<MaterialEntryAdmission> {
        let barcode = barcode.trim();
        let manual_entry = manual_entry.trim();
        let product_association = product_association.trim();

        if barcode.is_empty() && manual_entry.is_empty() {
            return Err(EngineError::MissingRequiredFields {
                fields: vec!["barcode|manual_entry".to_string()],
            });
        }

        let mapping = if product_association.is_empty() {
            None
        } else {
            if barcode.is_empty() && policy.require_stock_code_for_mapping {
                return Err(EngineError::InvalidValue {
                    field: "barcode".to_string(),
                    message: "关联产品时库存编码（条码）不能为空".to_string(),
                });
            }
            Some(StockProductMapping {
                stock_code: barcode.to_string(),
                product: product_association.to_string(),
            })
        };

        Ok(MaterialEntryAdmission {
            record: RawMaterialRecord::manual(barcode, manual_entry),
            mapping,
        })
    }

    /// 生产跟踪准入（阶段1）
    ///
    /// # 规则
    /// - bulk_material 非空
    /// - waste_factor 必须提供（0 视为已提供）,且为有限非负数
    /// - 加工后物料 = 散装物料条码本身
    pub fn admit_production_tracking(
        bulk_material: &str,
        waste_factor: Option<f64>,
    ) -> EngineResult<ProductionTrackingEntry> {
        let bulk_material = bulk_material.trim();

        let mut missing = Vec::new();
        if bulk_material.is_empty() {
            missing.push("bulk_material".to_string());
        }
        if waste_factor.is_none() {
            missing.push("waste_factor".to_string());
        }
        let waste_factor = match waste_factor {
            Some(w) if missing.is_empty() => w,
            _ => return Err(EngineError::MissingRequiredFields { fields: missing }),
        };

        if !waste_factor.is_finite() || waste_factor < 0.0 {
            return Err(EngineError::InvalidValue {
                field: "waste_factor".to_string(),
                message: format!("损耗系数必须为非负数: {}", waste_factor),
            });
        }

        Ok(ProductionTrackingEntry {
            bulk_material_barcode: bulk_material.to_string(),
            processed_material: Self::derive_processed_material(bulk_material),
            waste_factor,
        })
    }

    /// 加工后物料派生（当前规则: 与散装物料条码相同）
    pub fn derive_processed_material(bulk_material: &str) -> String {
        bulk_material.to_string()
    }

    /// 产品校验准入（字段层面）
    ///
    /// 引用检查与良率计算由 MetricsEngine::compute_yield 完成
    pub fn admit_product_verification(
        product_name: &str,
        associated_raw_material: &str,
    ) -> EngineResult<ProductVerificationEntry> {
        let product_name = product_name.trim();
        let associated_raw_material = associated_raw_material.trim();

        let mut missing = Vec::new();
        if product_name.is_empty() {
            missing.push("product_name".to_string());
        }
        if associated_raw_material.is_empty() {
            missing.push("associated_raw_material".to_string());
        }
        if !missing.is_empty() {
            return Err(EngineError::MissingRequiredFields { fields: missing });
        }

        Ok(ProductVerificationEntry {
            product: product_name.to_string(),
            associated_raw_material: associated_raw_material.to_string(),
        })
    }

    /// 工单准入
    ///
    /// # 规则
    /// 1. 五个字段均非空
    /// 2. 原材料表为空 → MissingReference（产品未关联）
    /// 3. 必须存在产品校验记录: product 相同且关联原材料 == 原材料表首行条码
    /// 4. policy.unique_order_id 打开时,工单号不得重复
    pub fn admit_work_order(
        store: &RecordStore,
        order_id: &str,
        product: &str,
        operator: &str,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        policy: AdmissionPolicy,
    ) -> EngineResult<WorkOrder> {
        let order_id = order_id.trim();
        let product = product.trim();
        let operator = operator.trim();

        let mut missing = Vec::new();
        for (name, value) in [
            ("order_id", order_id),
            ("product", product),
            ("operator", operator),
        ] {
            if value.is_empty() {
                missing.push(name.to_string());
            }
        }
        if start_time.is_none() {
            missing.push("start_time".to_string());
        }
        if end_time.is_none() {
            missing.push("end_time".to_string());
        }
        let (start_time, end_time) = match (start_time, end_time) {
            (Some(s), Some(e)) if missing.is_empty() => (s, e),
            _ => return Err(EngineError::MissingRequiredFields { fields: missing }),
        };

        let first_barcode = store
            .first_raw_material()
            .map(|r| r.barcode.as_str())
            .map_err(|_| EngineError::MissingReference {
                table: TableKind::RawMaterials,
                key: "row 0".to_string(),
                reason: format!("原材料表为空，产品 {} 未关联原材料", product),
            })?;

        let associated = store.product_verifications().any(|v| {
            v.product == product && v.associated_raw_material == first_barcode
        });
        if !associated {
            return Err(EngineError::NotAssociated {
                product: product.to_string(),
                raw_material: first_barcode.to_string(),
            });
        }

        if policy.unique_order_id && store.work_orders().any(|w| w.order_id == order_id) {
            return Err(EngineError::DuplicateKey {
                field: "order_id".to_string(),
                value: order_id.to_string(),
            });
        }

        Ok(WorkOrder {
            order_id: order_id.to_string(),
            product: product.to_string(),
            operator: operator.to_string(),
            start_time,
            end_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::MANUAL_ENTRY_COLUMN;

    fn hms(h: u32, m: u32, s: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, s)
    }

    fn store_with_verification(first_barcode: &str, product: &str, verified: &str) -> RecordStore {
        let mut store = RecordStore::new();
        store.append_raw_material(RawMaterialRecord::new(first_barcode));
        store.append_product_verification(ProductVerificationEntry {
            product: product.to_string(),
            associated_raw_material: verified.to_string(),
        });
        store
    }

    // ==========================================
    // 原材料录入
    // ==========================================

    #[test]
    fn test_material_entry_requires_barcode_or_manual() {
        let result =
            ValidationRules::admit_material_entry("", "  ", "Widget", AdmissionPolicy::default());
        assert!(matches!(
            result,
            Err(EngineError::MissingRequiredFields { .. })
        ));
    }

    #[test]
    fn test_material_entry_manual_only() {
        let admission =
            ValidationRules::admit_material_entry("", "托盘 7", "", AdmissionPolicy::default())
                .unwrap();
        assert_eq!(admission.record.barcode, "");
        assert_eq!(admission.record.attribute(MANUAL_ENTRY_COLUMN), Some("托盘 7"));
        assert!(admission.mapping.is_none());
    }

    #[test]
    fn test_material_entry_mapping_uses_empty_barcode_by_default() {
        let admission =
            ValidationRules::admit_material_entry("", "托盘 7", "Widget", AdmissionPolicy::default())
                .unwrap();
        let mapping = admission.mapping.unwrap();
        assert_eq!(mapping.stock_code, "");
        assert_eq!(mapping.product, "Widget");
    }

    #[test]
    fn test_material_entry_strict_mapping_rejects_empty_barcode() {
        let policy = AdmissionPolicy {
            require_stock_code_for_mapping: true,
            ..Default::default()
        };
        let result = ValidationRules::admit_material_entry("", "托盘 7", "Widget", policy);
        assert!(matches!(result, Err(EngineError::InvalidValue { .. })));
    }

    #[test]
    fn test_material_entry_values_are_trimmed() {
        let admission = ValidationRules::admit_material_entry(
            "  BC1 ",
            "",
            " Widget ",
            AdmissionPolicy::default(),
        )
        .unwrap();
        assert_eq!(admission.record.barcode, "BC1");
        assert_eq!(admission.mapping.unwrap().stock_code, "BC1");
    }

    // ==========================================
    // 生产跟踪
    // ==========================================

    #[test]
    fn test_production_tracking_zero_waste_is_present() {
        let entry = ValidationRules::admit_production_tracking("BULK-1", Some(0.0)).unwrap();
        assert_eq!(entry.processed_material, "BULK-1");
        assert_eq!(entry.waste_factor, 0.0);
    }

    #[test]
    fn test_production_tracking_missing_fields_listed() {
        match ValidationRules::admit_production_tracking(" ", None) {
            Err(EngineError::MissingRequiredFields { fields }) => {
                assert_eq!(fields, vec!["bulk_material", "waste_factor"]);
            }
            other => panic!("Expected MissingRequiredFields, got {:?}", other),
        }
    }

    #[test]
    fn test_production_tracking_rejects_negative_or_nan_waste() {
        assert!(matches!(
            ValidationRules::admit_production_tracking("BULK-1", Some(-0.1)),
            Err(EngineError::InvalidValue { .. })
        ));
        assert!(matches!(
            ValidationRules::admit_production_tracking("BULK-1", Some(f64::NAN)),
            Err(EngineError::InvalidValue { .. })
        ));
    }

    // ==========================================
    // 产品校验
    // ==========================================

    #[test]
    fn test_product_verification_requires_both_fields() {
        match ValidationRules::admit_product_verification("Widget", "") {
            Err(EngineError::MissingRequiredFields { fields }) => {
                assert_eq!(fields, vec!["associated_raw_material"]);
            }
            other => panic!("Expected MissingRequiredFields, got {:?}", other),
        }
    }

    // ==========================================
    // 工单
    // ==========================================

    #[test]
    fn test_work_order_requires_all_fields() {
        let store = store_with_verification("BC1", "Widget", "BC1");
        let result = ValidationRules::admit_work_order(
            &store,
            "WO-1",
            "Widget",
            "",
            hms(9, 0, 0),
            None,
            AdmissionPolicy::default(),
        );
        match result {
            Err(EngineError::MissingRequiredFields { fields }) => {
                assert_eq!(fields, vec!["operator", "end_time"]);
            }
            other => panic!("Expected MissingRequiredFields, got {:?}", other),
        }
    }

    #[test]
    fn test_work_order_empty_raw_materials_is_missing_reference() {
        let store = RecordStore::new();
        let result = ValidationRules::admit_work_order(
            &store,
            "WO-1",
            "Widget",
            "张三",
            hms(9, 0, 0),
            hms(9, 0, 10),
            AdmissionPolicy::default(),
        );
        match result {
            Err(EngineError::MissingReference { table, .. }) => {
                assert_eq!(table, TableKind::RawMaterials)
            }
            other => panic!("Expected MissingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_work_order_checks_first_row_barcode() {
        // 校验记录关联的是 BC2,但首行条码是 BC1
        let mut store = store_with_verification("BC1", "Widget", "BC2");
        store.append_raw_material(RawMaterialRecord::new("BC2"));

        let result = ValidationRules::admit_work_order(
            &store,
            "WO-1",
            "Widget",
            "张三",
            hms(9, 0, 0),
            hms(9, 0, 10),
            AdmissionPolicy::default(),
        );
        assert!(matches!(result, Err(EngineError::NotAssociated { .. })));
    }

    #[test]
    fn test_work_order_admitted_when_associated() {
        let store = store_with_verification("BC1", "Widget", "BC1");
        let order = ValidationRules::admit_work_order(
            &store,
            " WO-1 ",
            "Widget",
            "张三",
            hms(9, 0, 0),
            hms(9, 0, 10),
            AdmissionPolicy::default(),
        )
        .unwrap();
        assert_eq!(order.order_id, "WO-1");
        assert_eq!(order.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_work_order_unique_order_id_policy() {
        let mut store = store_with_verification("BC1", "Widget", "BC1");
        store.append_work_order(WorkOrder {
            order_id: "WO-1".to_string(),
            product: "Widget".to_string(),
            operator: "李四".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        });

        let args = |policy| {
            ValidationRules::admit_work_order(
                &store,
                "WO-1",
                "Widget",
                "张三",
                hms(9, 0, 0),
                hms(9, 0, 10),
                policy,
            )
        };

        assert!(args(AdmissionPolicy::default()).is_ok());
        let strict = AdmissionPolicy {
            unique_order_id: true,
            ..Default::default()
        };
        assert!(matches!(args(strict), Err(EngineError::DuplicateKey { .. })));
    }
}

// ==========================================
// 生产工单管理系统 - 会话上下文
// ==========================================
// 职责: 独占持有一个 RecordStore,串行处理该会话的全部提交
// 红线: 无进程级全局表; 存储只通过会话句柄访问
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::workflow_api::WorkflowApi;
use crate::config::config_manager::ConfigManager;
use crate::config::workflow_config_trait::WorkflowConfigReader;
use crate::domain::import::ImportSummary;
use crate::domain::report::{
    MaterialEntryReceipt, ProcessedMaterialSummary, ProductivityReport, YieldReport,
};
use crate::domain::tabular::TabularData;
use crate::engine::clock::{Clock, SystemClock};
use crate::repository::record_store::{RecordStore, StoreSnapshot};

/// 会话
///
/// 五张表在创建时为空,生命周期与会话相同,不做跨会话持久化
pub struct Session {
    session_id: String,
    created_at: DateTime<Utc>,
    store: RecordStore,
    api: WorkflowApi,
}

impl Session {
    pub fn new(config: Arc<dyn WorkflowConfigReader>, clock: Arc<dyn Clock>) -> Self {
        let session_id = Uuid::new_v4().to_string();
        tracing::debug!(session_id = %session_id, "创建会话");
        Self {
            session_id,
            created_at: Utc::now(),
            store: RecordStore::new(),
            api: WorkflowApi::new(config, clock),
        }
    }

    /// 默认配置 + 系统时钟
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(ConfigManager::new()), Arc::new(SystemClock))
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 只读访问（展示层）
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    pub fn snapshot_json(&self) -> ApiResult<String> {
        self.api.snapshot_json(&self.store)
    }

    // ==========================================
    // 提交接口（转发到 WorkflowApi）
    // ==========================================

    pub fn import_raw_materials(&mut self, table: &TabularData) -> ApiResult<ImportSummary> {
        self.api.import_raw_materials(&mut self.store, table)
    }

    pub fn submit_material_entry(
        &mut self,
        barcode: &str,
        manual_entry: &str,
        product_association: &str,
    ) -> ApiResult<MaterialEntryReceipt> {
        self.api
            .submit_material_entry(&mut self.store, barcode, manual_entry, product_association)
    }

    pub fn submit_production_tracking(
        &mut self,
        bulk_material: &str,
        waste_factor: Option<f64>,
    ) -> ApiResult<ProcessedMaterialSummary> {
        self.api
            .submit_production_tracking(&mut self.store, bulk_material, waste_factor)
    }

    pub fn submit_product_verification(
        &mut self,
        product_name: &str,
        associated_raw_material: &str,
    ) -> ApiResult<YieldReport> {
        self.api.submit_product_verification(
            &mut self.store,
            product_name,
            associated_raw_material,
        )
    }

    pub fn submit_work_order(
        &mut self,
        order_id: &str,
        product: &str,
        operator: &str,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> ApiResult<ProductivityReport> {
        self.api.submit_work_order(
            &mut self.store,
            order_id,
            product,
            operator,
            start_time,
            end_time,
        )
    }
}

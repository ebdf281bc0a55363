// ==========================================
// 生产工单管理系统 - 记录存储
// ==========================================
// 职责: 会话内五张只追加表的内存存储
// 红线: 只有追加与原材料整表替换,无更新/删除
// 红线: 无唯一约束（重复条码/工单号均允许）
// ==========================================

use crate::domain::records::{
    ProductVerificationEntry, ProductionTrackingEntry, RawMaterialRecord, StockProductMapping,
    WorkOrder,
};
use crate::domain::types::TableKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// Table - 有序只追加表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾,返回新记录下标
    pub fn append(&mut self, record: T) -> usize {
        self.rows.push(record);
        self.rows.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// 首行（"row 0" 查找）
    pub fn first(&self) -> Option<&T> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    pub fn count_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.rows.iter().filter(|r| pred(r)).count()
    }

    pub fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.rows.iter().any(pred)
    }

    /// 整表替换,返回被替换掉的旧行数
    fn replace(&mut self, rows: Vec<T>) -> usize {
        let previous = self.rows.len();
        self.rows = rows;
        previous
    }
}

impl<T> From<Vec<T>> for Table<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ==========================================
// StoreSnapshot - 存储快照
// ==========================================
// 用途: 展示层读取 / JSON 导出
pub type StoreSnapshot = RecordStore;

// ==========================================
// RecordStore - 会话记录存储
// ==========================================
/// 会话记录存储
///
/// 由会话上下文独占持有,以引用形式传入校验与指标函数。
/// 所有表在会话开始时为空,生命周期与会话相同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    raw_materials: Table<RawMaterialRecord>,
    production_tracking: Table<ProductionTrackingEntry>,
    stock_product_mappings: Table<StockProductMapping>,
    product_verifications: Table<ProductVerificationEntry>,
    work_orders: Table<WorkOrder>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 读取接口
    // ==========================================

    pub fn raw_materials(&self) -> &Table<RawMaterialRecord> {
        &self.raw_materials
    }

    pub fn production_tracking(&self) -> &Table<ProductionTrackingEntry> {
        &self.production_tracking
    }

    pub fn stock_product_mappings(&self) -> &Table<StockProductMapping> {
        &self.stock_product_mappings
    }

    pub fn product_verifications(&self) -> &Table<ProductVerificationEntry> {
        &self.product_verifications
    }

    pub fn work_orders(&self) -> &Table<WorkOrder> {
        &self.work_orders
    }

    /// 指定表的行数
    pub fn len_of(&self, table: TableKind) -> usize {
        match table {
            TableKind::RawMaterials => self.raw_materials.len(),
            TableKind::ProductionTracking => self.production_tracking.len(),
            TableKind::StockProductMapping => self.stock_product_mappings.len(),
            TableKind::ProductVerification => self.product_verifications.len(),
            TableKind::WorkOrders => self.work_orders.len(),
        }
    }

    /// 原材料表首行
    ///
    /// # 返回
    /// - Err(RepositoryError::NotFound): 原材料表为空
    pub fn first_raw_material(&self) -> RepositoryResult<&RawMaterialRecord> {
        self.raw_materials
            .first()
            .ok_or_else(|| RepositoryError::NotFound {
                table: TableKind::RawMaterials,
                key: "row 0".to_string(),
            })
    }

    /// 按条码统计原材料行数
    pub fn count_raw_materials_by_barcode(&self, barcode: &str) -> usize {
        self.raw_materials.count_where(|r| r.barcode == barcode)
    }

    /// 导出快照（深拷贝）
    pub fn snapshot(&self) -> StoreSnapshot {
        self.clone()
    }

    /// 快照 JSON
    pub fn snapshot_json(&self) -> RepositoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ==========================================
    // 写入接口（仅追加）
    // ==========================================

    pub fn append_raw_material(&mut self, record: RawMaterialRecord) -> usize {
        let index = self.raw_materials.append(record);
        debug!(table = %TableKind::RawMaterials, index, "追加记录");
        index
    }

    pub fn append_production_tracking(&mut self, entry: ProductionTrackingEntry) -> usize {
        let index = self.production_tracking.append(entry);
        debug!(table = %TableKind::ProductionTracking, index, "追加记录");
        index
    }

    pub fn append_stock_product_mapping(&mut self, mapping: StockProductMapping) -> usize {
        let index = self.stock_product_mappings.append(mapping);
        debug!(table = %TableKind::StockProductMapping, index, "追加记录");
        index
    }

    pub fn append_product_verification(&mut self, entry: ProductVerificationEntry) -> usize {
        let index = self.product_verifications.append(entry);
        debug!(table = %TableKind::ProductVerification, index, "追加记录");
        index
    }

    pub fn append_work_order(&mut self, order: WorkOrder) -> usize {
        let index = self.work_orders.append(order);
        debug!(table = %TableKind::WorkOrders, index, "追加记录");
        index
    }

    /// 原材料整表替换（外部导入）,返回旧表行数
    pub fn replace_raw_materials(&mut self, records: Vec<RawMaterialRecord>) -> usize {
        let new_len = records.len();
        let previous = self.raw_materials.replace(records);
        debug!(previous, new_len, "原材料表整表替换");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn order(id: &str) -> WorkOrder {
        WorkOrder {
            order_id: id.to_string(),
            product: "Widget".to_string(),
            operator: "张三".to_string(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecordStore::new();
        for table in [
            TableKind::RawMaterials,
            TableKind::ProductionTracking,
            TableKind::StockProductMapping,
            TableKind::ProductVerification,
            TableKind::WorkOrders,
        ] {
            assert_eq!(store.len_of(table), 0);
        }
    }

    #[test]
    fn test_append_then_read_by_index_returns_same_record() {
        let mut store = RecordStore::new();
        let first = RawMaterialRecord::new("BC1").with_attribute("Supplier", "ACME");
        let second = RawMaterialRecord::new("BC2");

        assert_eq!(store.append_raw_material(first.clone()), 0);
        assert_eq!(store.append_raw_material(second.clone()), 1);

        assert_eq!(store.raw_materials().get(0), Some(&first));
        assert_eq!(store.raw_materials().get(1), Some(&second));
    }

    #[test]
    fn test_duplicate_keys_are_permitted() {
        let mut store = RecordStore::new();
        store.append_work_order(order("WO-1"));
        store.append_work_order(order("WO-1"));
        assert_eq!(store.work_orders().len(), 2);

        store.append_raw_material(RawMaterialRecord::new("BC1"));
        store.append_raw_material(RawMaterialRecord::new("BC1"));
        assert_eq!(store.count_raw_materials_by_barcode("BC1"), 2);
    }

    #[test]
    fn test_first_raw_material_on_empty_table() {
        let store = RecordStore::new();
        match store.first_raw_material() {
            Err(RepositoryError::NotFound { table, .. }) => {
                assert_eq!(table, TableKind::RawMaterials)
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_raw_materials_swaps_whole_table() {
        let mut store = RecordStore::new();
        store.append_raw_material(RawMaterialRecord::new("OLD"));

        let previous = store.replace_raw_materials(vec![
            RawMaterialRecord::new("NEW1"),
            RawMaterialRecord::new("NEW2"),
        ]);

        assert_eq!(previous, 1);
        assert_eq!(store.raw_materials().len(), 2);
        assert_eq!(store.first_raw_material().unwrap().barcode, "NEW1");
        assert_eq!(store.count_raw_materials_by_barcode("OLD"), 0);
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let mut store = RecordStore::new();
        store.append_raw_material(RawMaterialRecord::new("BC1"));
        let snapshot = store.snapshot();

        store.append_raw_material(RawMaterialRecord::new("BC2"));

        assert_eq!(snapshot.raw_materials().len(), 1);
        assert_eq!(store.raw_materials().len(), 2);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut store = RecordStore::new();
        store.append_raw_material(RawMaterialRecord::new("BC1"));
        store.append_work_order(order("WO-7"));

        let json = store.snapshot_json().unwrap();
        let restored: RecordStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
    }
}

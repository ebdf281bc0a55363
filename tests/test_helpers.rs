// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的会话初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use production_workorder::app::Session;
use production_workorder::config::ConfigManager;
use production_workorder::engine::FixedClock;
use production_workorder::TabularData;
use std::sync::Arc;

/// 测试固定日期
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn hms(h: u32, m: u32, s: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, s)
}

/// 创建测试会话（固定日期 + 指定配置）
pub fn create_test_session(pairs: &[(&str, &str)]) -> Session {
    production_workorder::logging::init_test();
    let config = ConfigManager::from_pairs(pairs.iter().copied());
    Session::new(Arc::new(config), Arc::new(FixedClock(test_today())))
}

/// 创建默认配置的测试会话
pub fn default_session() -> Session {
    create_test_session(&[])
}

/// 构造原材料表格（Barcode + Supplier 两列）
pub fn raw_material_table(barcodes: &[&str]) -> TabularData {
    let mut table = TabularData::new(vec!["Barcode".to_string(), "Supplier".to_string()]);
    for barcode in barcodes {
        table.push_row(vec![barcode.to_string(), "ACME".to_string()]);
    }
    table
}

/// 追加 n 条生产跟踪记录
pub fn track_production(session: &mut Session, n: usize) {
    for i in 0..n {
        session
            .submit_production_tracking(&format!("BULK-{:03}", i), Some(0.05))
            .expect("生产跟踪记录失败");
    }
}

/// 各表行数: (原材料, 生产跟踪, 映射, 产品校验, 工单)
pub fn table_sizes(session: &Session) -> (usize, usize, usize, usize, usize) {
    let store = session.store();
    (
        store.raw_materials().len(),
        store.production_tracking().len(),
        store.stock_product_mappings().len(),
        store.product_verifications().len(),
        store.work_orders().len(),
    )
}

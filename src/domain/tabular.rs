// ==========================================
// 生产工单管理系统 - 通用表格数据
// ==========================================
// 用途: 外部展示层已解析好的行列结构（CSV/Excel 解析不在本库范围）
// 约定: 原材料表至少包含 Barcode 列
// ==========================================

use serde::{Deserialize, Serialize};

/// 原材料表条码列名
pub const BARCODE_COLUMN: &str = "Barcode";

/// 通用表格数据（表头 + 数据行）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 从字符串切片构造（测试与展示层便捷入口）
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// 查找列下标（表头两端空白忽略）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 读取单元格; 行长度不足时返回 None
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

// ==========================================
// 生产工单管理系统 - 导入层
// ==========================================
// 职责: 外部已解析表格 → 原材料记录 + DQ 报告
// 说明: CSV/Excel 文件解析由外部展示层负责
// ==========================================

// 模块声明
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod raw_material_importer;

// 重导出核心类型
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, MappedRow};
pub use raw_material_importer::{PreparedImport, RawMaterialImporter};

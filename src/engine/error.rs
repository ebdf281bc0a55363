// ==========================================
// 生产工单管理系统 - 引擎层错误类型
// ==========================================
// 分类: 校验失败 / 引用缺失 / 指标未定义
// 红线: 所有错误只终止当次提交,不得修改记录存储
// ==========================================

use crate::domain::types::TableKind;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 校验失败（用户输入层面）=====
    #[error("缺少必填字段: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },

    #[error("字段值无效 (field={field}): {message}")]
    InvalidValue { field: String, message: String },

    #[error("产品未与所提供的原材料关联: product={product}, raw_material={raw_material}")]
    NotAssociated {
        product: String,
        raw_material: String,
    },

    #[error("重复键 (field={field}): {value}")]
    DuplicateKey { field: String, value: String },

    // ===== 引用缺失 =====
    #[error("引用缺失 (table={table}, key={key}): {reason}")]
    MissingReference {
        table: TableKind,
        key: String,
        reason: String,
    },

    // ===== 指标未定义（分母为零）=====
    #[error("指标无法计算 ({metric}): {reason}")]
    UndefinedMetric { metric: String, reason: String },
}

impl EngineError {
    /// 是否属于校验失败类（缺字段/非法值/未关联/重复键）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::MissingRequiredFields { .. }
                | EngineError::InvalidValue { .. }
                | EngineError::NotAssociated { .. }
                | EngineError::DuplicateKey { .. }
        )
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

// ==========================================
// 生产工单管理系统 - API层错误类型
// ==========================================
// 职责: 统一对外错误分类,转换各层错误
// 分类: 校验失败 / 引用缺失 / 指标未定义 / 导入 / 配置 / 会话
// 红线: 每次提交只返回 {成功 + 报告} 或 {拒绝 + 原因} 之一
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::types::TableKind;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 提交拒绝
    // ==========================================
    /// 缺字段、非法值、产品未关联、重复键
    #[error("数据验证失败: {0}")]
    ValidationError(EngineError),

    #[error("引用缺失 (table={table}, key={key}): {reason}")]
    MissingReference {
        table: TableKind,
        key: String,
        reason: String,
    },

    #[error("指标无法计算 ({metric}): {reason}")]
    UndefinedMetric { metric: String, reason: String },

    // ==========================================
    // 导入 / 配置
    // ==========================================
    #[error("原材料导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 会话
    // ==========================================
    #[error("会话不存在: {0}")]
    SessionNotFound(String),

    #[error("会话锁获取失败: {0}")]
    LockError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// ErrorKind - 错误大类（供展示层分支）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    MissingReference,
    UndefinedMetric,
    Import,
    Config,
    Session,
    Internal,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::ValidationError(_) => ErrorKind::Validation,
            ApiError::MissingReference { .. } => ErrorKind::MissingReference,
            ApiError::UndefinedMetric { .. } => ErrorKind::UndefinedMetric,
            ApiError::ImportError(_) => ErrorKind::Import,
            ApiError::ConfigError(_) => ErrorKind::Config,
            ApiError::SessionNotFound(_) | ApiError::LockError(_) => ErrorKind::Session,
            ApiError::InternalError(_) | ApiError::Other(_) => ErrorKind::Internal,
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MissingReference { table, key, reason } => {
                ApiError::MissingReference { table, key, reason }
            }
            EngineError::UndefinedMetric { metric, reason } => {
                ApiError::UndefinedMetric { metric, reason }
            }
            other => ApiError::ValidationError(other),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { table, key } => ApiError::MissingReference {
                table,
                key,
                reason: "记录未找到".to_string(),
            },
            RepositoryError::SnapshotError(msg) => ApiError::InternalError(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_conversion() {
        let api_err: ApiError = EngineError::NotAssociated {
            product: "Widget".to_string(),
            raw_material: "BC1".to_string(),
        }
        .into();
        assert_eq!(api_err.kind(), ErrorKind::Validation);
        assert!(api_err.to_string().contains("未与所提供的原材料关联"));

        let api_err: ApiError = EngineError::UndefinedMetric {
            metric: "yield".to_string(),
            reason: "分母为 0".to_string(),
        }
        .into();
        assert_eq!(api_err.kind(), ErrorKind::UndefinedMetric);
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::NotFound {
            table: TableKind::RawMaterials,
            key: "row 0".to_string(),
        }
        .into();
        match api_err {
            ApiError::MissingReference { table, key, .. } => {
                assert_eq!(table, TableKind::RawMaterials);
                assert_eq!(key, "row 0");
            }
            other => panic!("Expected MissingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_import_error_conversion() {
        let api_err: ApiError = ImportError::MissingColumn("Barcode".to_string()).into();
        assert_eq!(api_err.kind(), ErrorKind::Import);
        assert!(api_err.to_string().contains("Barcode"));
    }
}

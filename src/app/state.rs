// ==========================================
// 生产工单管理系统 - 应用状态
// ==========================================
// 职责: 多会话注册表,按会话隔离记录存储
// 并发: 每次提交只锁定所属会话,校验→计算→追加在同一把锁内完成
// ==========================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::error::{ApiError, ApiResult};
use crate::app::session::Session;
use crate::config::config_manager::ConfigManager;
use crate::config::workflow_config_trait::WorkflowConfigReader;
use crate::engine::clock::{Clock, SystemClock};

/// 应用状态
///
/// 共享配置与时钟,会话之间不共享任何记录表
pub struct AppState {
    config: Arc<dyn WorkflowConfigReader>,
    clock: Arc<dyn Clock>,
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl AppState {
    pub fn new(config: Arc<dyn WorkflowConfigReader>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// 从默认配置文件初始化（文件不存在时使用默认配置）
    pub fn from_default_config() -> ApiResult<Self> {
        let config = ConfigManager::load_default()?;
        tracing::info!(locale = %config.get_locale(), "AppState初始化成功");
        Ok(Self::new(Arc::new(config), Arc::new(SystemClock)))
    }

    /// 打开新会话,返回会话 ID
    pub fn open_session(&self) -> ApiResult<String> {
        let session = Session::new(self.config.clone(), self.clock.clone());
        let session_id = session.id().to_string();

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::LockError(format!("会话表锁获取失败: {}", e)))?;
        sessions.insert(session_id.clone(), Arc::new(Mutex::new(session)));

        tracing::info!(session_id = %session_id, active = sessions.len(), "会话已打开");
        Ok(session_id)
    }

    /// 关闭会话（会话内全部记录随之丢弃）
    pub fn close_session(&self, session_id: &str) -> ApiResult<()> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::LockError(format!("会话表锁获取失败: {}", e)))?;
        sessions
            .remove(session_id)
            .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))?;

        tracing::info!(session_id = %session_id, active = sessions.len(), "会话已关闭");
        Ok(())
    }

    pub fn session_count(&self) -> ApiResult<usize> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::LockError(format!("会话表锁获取失败: {}", e)))?;
        Ok(sessions.len())
    }

    fn session_handle(&self, session_id: &str) -> ApiResult<Arc<Mutex<Session>>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::LockError(format!("会话表锁获取失败: {}", e)))?;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))
    }

    /// 在会话锁内执行操作
    ///
    /// 会话表锁只在取句柄时持有,不同会话的提交互不阻塞
    pub fn with_session<T, F>(&self, session_id: &str, f: F) -> ApiResult<T>
    where
        F: FnOnce(&mut Session) -> ApiResult<T>,
    {
        let handle = self.session_handle(session_id)?;
        let mut session = handle
            .lock()
            .map_err(|e| ApiError::LockError(format!("会话 {} 锁获取失败: {}", session_id, e)))?;
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Arc::new(ConfigManager::new()), Arc::new(SystemClock))
    }

    #[test]
    fn test_open_and_close_session() {
        let state = state();
        let id = state.open_session().unwrap();
        assert_eq!(state.session_count().unwrap(), 1);

        state.close_session(&id).unwrap();
        assert_eq!(state.session_count().unwrap(), 0);

        assert!(matches!(
            state.close_session(&id),
            Err(ApiError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_session() {
        let state = state();
        let result = state.with_session("missing", |s| Ok(s.store().raw_materials().len()));
        assert!(matches!(result, Err(ApiError::SessionNotFound(_))));
    }
}

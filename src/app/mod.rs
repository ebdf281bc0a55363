// ==========================================
// 生产工单管理系统 - 应用层
// ==========================================
// 职责: 会话上下文与多会话隔离
// ==========================================

pub mod session;
pub mod state;

pub use session::Session;
pub use state::AppState;

// ==========================================
// 生产工单管理系统 - 工作流配置读取 Trait
// ==========================================
// 职责: 定义校验规则与指标引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// WorkflowConfigReader Trait
// ==========================================
// 实现者: ConfigManager（JSON 键值配置）
pub trait WorkflowConfigReader: Send + Sync {
    /// 获取良率阈值
    ///
    /// # 默认值
    /// - 0.8
    ///
    /// # 用途
    /// - yield >= 阈值 → ACCEPTABLE, 否则 BELOW_THRESHOLD
    fn get_yield_threshold(&self) -> f64;

    /// 是否允许跨零点工单（结束时刻早于开始时刻视为次日）
    ///
    /// # 默认值
    /// - false（结束早于开始直接拒绝）
    fn allow_overnight_work_order(&self) -> bool;

    /// 是否要求工单号唯一
    ///
    /// # 默认值
    /// - false（与原有行为一致,重复工单号允许）
    fn require_unique_order_id(&self) -> bool;

    /// 创建库存映射时是否要求条码非空
    ///
    /// # 默认值
    /// - false（条码为空时仍以空串作为库存编码）
    fn require_stock_code_for_mapping(&self) -> bool;

    /// 获取展示消息语言
    ///
    /// # 默认值
    /// - "zh-CN"
    fn get_locale(&self) -> String;
}

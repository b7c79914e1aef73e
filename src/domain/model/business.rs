//! 业务路由
//!
//! 自定义消息 / 信令载荷中提取的路由键，用于派发可插拔单元构建器。

/// 保留业务 ID（单一数据源，分类与预览两侧都引用这里的常量）
pub mod business_ids {
    /// 客服插件业务 ID 前缀，后接来源标识
    pub const CUSTOMER_SERVICE_PREFIX: &str = "customerServicePlugin";

    /// 机器人插件业务 ID
    pub const CHATBOT: &str = "chatbotPlugin";

    /// 显式忽略标记：无注册构建器时静默丢弃
    pub const IGNORE_MESSAGE: &str = "IgnoreMessage";

    /// 机器人载荷中需要忽略的 src 值
    pub const CHATBOT_IGNORED_SRC: f64 = 22.0;
}

/// 业务路由解析结果
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BusinessRoute {
    /// 可能为空：载荷未携带路由键或解析失败
    pub business_id: String,
    /// 为 true 时分类与预览都必须产出 None，两侧语义一致
    pub exclude_from_history: bool,
}

impl BusinessRoute {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.business_id.is_empty()
    }

    /// 无注册构建器时是否静默丢弃
    pub fn drops_silently(&self) -> bool {
        self.business_id
            .contains(business_ids::CUSTOMER_SERVICE_PREFIX)
            || self.business_id.contains(business_ids::IGNORE_MESSAGE)
    }
}

//! 外部协作方接口
//!
//! 管线对注册表 / 目录 / 进度存储只做只读查询，实现由宿主在
//! 组装根注入。除用户名目录外全部同步，保证分类是纯函数。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::model::{CallingInfo, CellData, MessageEnvelope};

/// 业务单元构建器：按业务 ID 注册，分类与预览各取所需
pub trait CustomCellBuilder: Send + Sync {
    fn build(&self, envelope: &MessageEnvelope) -> CellData;

    /// 会话列表预览串；返回 None 表示该消息不出现在预览里
    fn display_string(&self, envelope: &MessageEnvelope) -> Option<String>;

    /// 构建完成后二次判定是否隐藏
    fn should_hide(&self, _cell: &CellData) -> bool {
        false
    }
}

/// 构建器注册表：业务 ID -> 构建器，宿主启动时注册完毕
pub trait CellBuilderRegistry: Send + Sync {
    fn builder_for(&self, business_id: &str) -> Option<Arc<dyn CustomCellBuilder>>;

    /// 云端自定义标记命中 reply 时使用的构建器
    fn reply_builder(&self) -> Option<Arc<dyn CustomCellBuilder>> {
        None
    }

    /// 云端自定义标记命中 reference 时使用的构建器
    fn reference_builder(&self) -> Option<Arc<dyn CustomCellBuilder>> {
        None
    }
}

/// 通话信令数据源：判定消息是否为通话事件并给出已解析视图
pub trait CallingDataSource: Send + Sync {
    /// 返回 None 表示未认领，走普通自定义消息派发
    fn calling_info(&self, envelope: &MessageEnvelope) -> Option<CallingInfo>;
}

/// 每条消息的上传 / 下载进度快照（按 msg_id 查询，0-100）
pub trait ProgressStore: Send + Sync {
    fn upload_progress(&self, msg_id: &str) -> u32;
    fn download_progress(&self, msg_id: &str) -> u32;
}

/// 用户名目录：批量 ID -> 展示名。查不到的 ID 由调用方降级为原始 ID
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn display_names(&self, user_ids: &[String]) -> HashMap<String, String>;
}

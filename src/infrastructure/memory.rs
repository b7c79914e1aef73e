//! 内存实现
//!
//! 外部协作方接口的进程内实现：构建器注册表在启动期注册完毕后
//! 只读；进度存储用并发映射承接传输层的高频写入；静态用户名目录
//! 主要服务于测试与单机宿主。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::model::{CallingInfo, MessageEnvelope};
use crate::domain::repository::{
    CallingDataSource, CellBuilderRegistry, CustomCellBuilder, ProgressStore, UserDirectory,
};

/// 显式类型化注册表：业务 ID -> 构建器，启动期由宿主填充
#[derive(Default)]
pub struct InMemoryBuilderRegistry {
    builders: HashMap<String, Arc<dyn CustomCellBuilder>>,
    reply: Option<Arc<dyn CustomCellBuilder>>,
    reference: Option<Arc<dyn CustomCellBuilder>>,
}

impl InMemoryBuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, business_id: impl Into<String>, builder: Arc<dyn CustomCellBuilder>) {
        self.builders.insert(business_id.into(), builder);
    }

    pub fn set_reply_builder(&mut self, builder: Arc<dyn CustomCellBuilder>) {
        self.reply = Some(builder);
    }

    pub fn set_reference_builder(&mut self, builder: Arc<dyn CustomCellBuilder>) {
        self.reference = Some(builder);
    }
}

impl CellBuilderRegistry for InMemoryBuilderRegistry {
    fn builder_for(&self, business_id: &str) -> Option<Arc<dyn CustomCellBuilder>> {
        self.builders.get(business_id).cloned()
    }

    fn reply_builder(&self) -> Option<Arc<dyn CustomCellBuilder>> {
        self.reply.clone()
    }

    fn reference_builder(&self) -> Option<Arc<dyn CustomCellBuilder>> {
        self.reference.clone()
    }
}

/// 不认领任何消息的通话数据源（未接入通话组件的宿主使用）
pub struct NoCallingSource;

impl CallingDataSource for NoCallingSource {
    fn calling_info(&self, _envelope: &MessageEnvelope) -> Option<CallingInfo> {
        None
    }
}

/// 按 msg_id 记录上传 / 下载进度（0-100），查不到即为 0
#[derive(Default)]
pub struct InMemoryProgressStore {
    upload: DashMap<String, u32>,
    download: DashMap<String, u32>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_upload_progress(&self, msg_id: &str, progress: u32) {
        self.upload.insert(msg_id.to_string(), progress);
    }

    pub fn set_download_progress(&self, msg_id: &str, progress: u32) {
        self.download.insert(msg_id.to_string(), progress);
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn upload_progress(&self, msg_id: &str) -> u32 {
        self.upload.get(msg_id).map(|entry| *entry).unwrap_or(0)
    }

    fn download_progress(&self, msg_id: &str) -> u32 {
        self.download.get(msg_id).map(|entry| *entry).unwrap_or(0)
    }
}

/// 静态用户名目录：只返回已知条目，缺失由调用方降级处理
#[derive(Default)]
pub struct StaticUserDirectory {
    names: HashMap<String, String>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: impl Into<String>, display_name: impl Into<String>) {
        self.names.insert(user_id.into(), display_name.into());
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn display_names(&self, user_ids: &[String]) -> HashMap<String, String> {
        user_ids
            .iter()
            .filter_map(|id| {
                self.names
                    .get(id)
                    .map(|name| (id.clone(), name.clone()))
            })
            .collect()
    }
}

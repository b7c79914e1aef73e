//! Ember Cell Pipeline 公共库
//!
//! 将 IM 协议消息（信封）确定性地派生为展示层所需的单元数据与预览串：
//! - 分类：信封 -> 具体单元数据变体（或显式丢弃）
//! - 预览：信封 -> 会话列表预览串（与分类共享同一条优先级规则链）
//! - 富化：发送者名展示规则、状态映射、上传/下载进度注入、回复数标注
//!
//! 管线本身同步、无副作用；外部协作方（自定义单元构建器注册表、
//! 用户名目录、进度存储、通话信令数据源）通过 trait 注入。

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;

pub use config::{CallingAppearance, PipelineConfig};
pub use domain::model::{
    BusinessRoute, CallingInfo, CellData, CellStatus, CellVariant, Direction, ElementPayload,
    ElementType, MessageEnvelope, MessageStatus,
};
pub use domain::repository::{
    CallingDataSource, CellBuilderRegistry, CustomCellBuilder, ProgressStore, UserDirectory,
};
pub use domain::service::{
    BusinessIdResolver, CellDataEnricher, CellPipeline, PipelineOutcome, RevokeHandler,
};
pub use error::{CellPipelineError, Result};

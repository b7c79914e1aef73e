//! 管线错误类型
//!
//! 分类本身是尽力而为：载荷解析失败只记日志并降级为空路由，
//! 不会向调用方抛出。错误类型仅在解码缝隙内部传递。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CellPipelineError {
    /// 自定义消息 / 信令载荷不是合法 JSON
    #[error("invalid payload json: {0}")]
    PayloadDecode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CellPipelineError>;

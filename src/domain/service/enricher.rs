//! 单元数据富化
//!
//! 分类产出后、交付展示层前的就地补全：发送者名可见性、状态映射、
//! 进度注入与回复数标注。外部查询缺失时降级为零值，不阻塞分类。

use serde_json::Value;
use tracing::debug;

use crate::domain::model::{CellData, CellStatus, MessageEnvelope, MessageStatus, ReplyDigest};
use crate::domain::model::CloudCustomFlag;
use crate::domain::repository::ProgressStore;
use crate::error::Result;

pub struct CellDataEnricher;

impl CellDataEnricher {
    pub fn enrich(cell: &mut CellData, envelope: &MessageEnvelope, progress: &dyn ProgressStore) {
        // 群内他人消息展示发送者名；系统样式单元除外
        cell.show_name = envelope.in_group() && !envelope.is_self && !cell.variant.is_system_like();

        match envelope.status {
            MessageStatus::SendSucceeded => cell.status = CellStatus::Sent,
            MessageStatus::SendFailed => cell.status = CellStatus::Failed,
            MessageStatus::Sending => cell.status = CellStatus::Sending,
            _ => {}
        }

        if !envelope.msg_id.is_empty() {
            if let Some(upload) = cell.variant.upload_progress_mut() {
                *upload = progress.upload_progress(&envelope.msg_id);
            }
            if let Some(download) = cell.variant.download_mut() {
                let value = progress.download_progress(&envelope.msg_id);
                download.progress = value;
                download.is_downloading = value != 0 && value != 100;
            }
        }

        if envelope.has_cloud_custom(CloudCustomFlag::RepliesCount) {
            if cell.variant.is_system_like() {
                cell.show_replies = false;
            } else {
                cell.show_replies = true;
                cell.replies = Self::parse_replies(envelope).unwrap_or_else(|err| {
                    debug!(msg_id = %envelope.msg_id, error = %err, "failed to parse replies payload");
                    Vec::new()
                });
            }
        }
    }

    /// 云端自定义数据格式：`{"message_replies":{"replies":[...]}}`
    fn parse_replies(envelope: &MessageEnvelope) -> Result<Vec<ReplyDigest>> {
        let Some(data) = &envelope.cloud_custom_data else {
            return Ok(Vec::new());
        };
        let value: Value = serde_json::from_slice(data)?;
        let Some(replies) = value
            .get("message_replies")
            .and_then(|node| node.get("replies"))
        else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_value(replies.clone())?)
    }
}

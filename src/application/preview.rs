//! 批量预览解析
//!
//! 会话列表渲染前对一批信封批量解析预览串：群通话 / 群提示文案
//! 中的 `{userID}` 占位符需要替换为展示名，用户名目录按批查询一次。
//! 目录缺失的 ID 降级为原始 ID，不阻塞也不报错。

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::model::{CellData, CellVariant, MessageEnvelope};
use crate::domain::repository::UserDirectory;
use crate::domain::service::CellPipeline;

pub struct PreviewResolver {
    pipeline: Arc<CellPipeline>,
    directory: Arc<dyn UserDirectory>,
}

impl PreviewResolver {
    pub fn new(pipeline: Arc<CellPipeline>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            pipeline,
            directory,
        }
    }

    /// 批量解析：msg_id -> 替换完占位符的预览串。
    /// 被压制的消息不出现在结果里；逐条分类相互独立。
    pub async fn resolve_previews(
        &self,
        envelopes: &[MessageEnvelope],
    ) -> HashMap<String, String> {
        let mut previews = HashMap::new();
        let mut placeholder_ids: Vec<String> = Vec::new();

        for envelope in envelopes {
            let outcome = self.pipeline.process(envelope);
            if let Some(display) = outcome.display {
                previews.insert(envelope.msg_id.clone(), display);
            }
            if let Some(cell) = outcome.cell {
                collect_placeholder_ids(&cell, &mut placeholder_ids);
            }
        }

        if placeholder_ids.is_empty() {
            return previews;
        }
        placeholder_ids.sort();
        placeholder_ids.dedup();

        let names = self.directory.display_names(&placeholder_ids).await;
        for preview in previews.values_mut() {
            for user_id in &placeholder_ids {
                let placeholder = format!("{{{user_id}}}");
                if preview.contains(&placeholder) {
                    let shown = names.get(user_id).map(String::as_str).unwrap_or(user_id);
                    *preview = preview.replace(&placeholder, shown);
                }
            }
        }
        previews
    }
}

/// 单元数据中可能被 `{userID}` 占位引用的用户 ID
fn collect_placeholder_ids(cell: &CellData, out: &mut Vec<String>) {
    match &cell.variant {
        CellVariant::System(system) => out.extend(system.replaced_user_ids.iter().cloned()),
        CellVariant::JoinGroup(join) => {
            if !join.op_user_id.is_empty() {
                out.push(join.op_user_id.clone());
            }
            out.extend(join.user_id_list.iter().cloned());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::domain::model::{
        CallMediaType, CallParticipantType, CallProtocolType, CallRole, CallingInfo,
        CustomElement, Direction, ElementPayload, TextElement,
    };
    use crate::domain::repository::CallingDataSource;
    use crate::infrastructure::memory::{
        InMemoryBuilderRegistry, InMemoryProgressStore, StaticUserDirectory,
    };

    struct GroupCallSource;

    impl CallingDataSource for GroupCallSource {
        fn calling_info(&self, envelope: &MessageEnvelope) -> Option<CallingInfo> {
            matches!(envelope.element, ElementPayload::Custom(_)).then(|| CallingInfo {
                protocol_type: CallProtocolType::Send,
                media_type: CallMediaType::Video,
                participant_type: CallParticipantType::Group,
                role: CallRole::Caller,
                direction: Direction::Incoming,
                exclude_from_history: false,
                content: Some("{u1} started a group call".to_string()),
                show_unread_point: false,
                use_receiver_avatar: false,
                participant_ids: vec!["u1".to_string()],
            })
        }
    }

    fn resolver(directory: StaticUserDirectory) -> PreviewResolver {
        let pipeline = CellPipeline::new(
            PipelineConfig::default(),
            Arc::new(InMemoryBuilderRegistry::new()),
            Arc::new(GroupCallSource),
            Arc::new(InMemoryProgressStore::new()),
        );
        PreviewResolver::new(Arc::new(pipeline), Arc::new(directory))
    }

    fn call_envelope(msg_id: &str) -> MessageEnvelope {
        MessageEnvelope {
            msg_id: msg_id.to_string(),
            element: ElementPayload::Custom(CustomElement {
                data: b"{}".to_vec(),
                description: String::new(),
                extension: String::new(),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn placeholders_are_replaced_with_directory_names() {
        let mut directory = StaticUserDirectory::new();
        directory.insert("u1", "Alice");
        let previews = resolver(directory)
            .resolve_previews(&[call_envelope("m1")])
            .await;
        assert_eq!(
            previews.get("m1").map(String::as_str),
            Some("Alice started a group call")
        );
    }

    #[tokio::test]
    async fn missing_directory_entry_falls_back_to_raw_id() {
        let previews = resolver(StaticUserDirectory::new())
            .resolve_previews(&[call_envelope("m1")])
            .await;
        assert_eq!(
            previews.get("m1").map(String::as_str),
            Some("u1 started a group call")
        );
    }

    #[tokio::test]
    async fn plain_messages_pass_through_untouched() {
        let mut directory = StaticUserDirectory::new();
        directory.insert("u1", "Alice");
        let envelope = MessageEnvelope {
            msg_id: "m2".to_string(),
            element: ElementPayload::Text(TextElement {
                text: "hi there".to_string(),
            }),
            ..Default::default()
        };
        let previews = resolver(directory).resolve_previews(&[envelope]).await;
        assert_eq!(previews.get("m2").map(String::as_str), Some("hi there"));
    }
}

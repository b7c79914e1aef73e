//! 通话消息适配
//!
//! 把通话数据源解析出的通话信息翻译为单元数据 / 预览串：
//! 一对一通话复用文本单元并带上通话标记，群通话渲染为系统单元，
//! 标记排除的事件整条压制。

use std::sync::Arc;

use crate::domain::model::{
    CallMediaType, CallParticipantType, CallRole, CallingInfo, CellData, CellVariant,
    MessageEnvelope, SystemCell, SystemCellKind, TextCell, UnsupportedCell,
};
use crate::domain::repository::CallingDataSource;
use crate::i18n::localized;

pub struct CallingMessageAdapter {
    source: Arc<dyn CallingDataSource>,
}

impl CallingMessageAdapter {
    pub fn new(source: Arc<dyn CallingDataSource>) -> Self {
        Self { source }
    }

    /// 未认领返回 None，派发落回普通自定义消息处理
    pub fn claim(&self, envelope: &MessageEnvelope) -> Option<CallingInfo> {
        self.source.calling_info(envelope)
    }

    /// 认领后的单元数据；None 表示该通话事件被排除出时间线
    pub fn cell_data(&self, info: &CallingInfo, envelope: &MessageEnvelope) -> Option<CellData> {
        if info.exclude_from_history {
            return None;
        }

        match info.participant_type {
            CallParticipantType::OneToOne => {
                let Some(content) = info.content.clone() else {
                    // 无文案的通话事件退化为不支持占位
                    return Some(CellData::from_envelope(
                        CellVariant::Unsupported(UnsupportedCell {
                            placeholder: localized("message.unsupported").to_string(),
                        }),
                        envelope,
                    ));
                };
                let cell = TextCell {
                    content,
                    is_audio_call: info.media_type == CallMediaType::Voice,
                    is_video_call: info.media_type == CallMediaType::Video,
                    is_caller: info.role == CallRole::Caller,
                    show_unread_point: info.show_unread_point,
                    use_receiver_avatar: info.use_receiver_avatar,
                };
                let mut data = CellData::new(CellVariant::Text(cell), info.direction);
                data.msg_id = envelope.msg_id.clone();
                data.needs_read_receipt = envelope.needs_read_receipt;
                Some(data)
            }
            CallParticipantType::Group => {
                let cell = SystemCell {
                    content: info.content.clone().unwrap_or_default(),
                    kind: SystemCellKind::Plain,
                    replaced_user_ids: info.participant_ids.clone(),
                };
                let mut data = CellData::new(CellVariant::System(cell), info.direction);
                data.msg_id = envelope.msg_id.clone();
                Some(data)
            }
            CallParticipantType::Unknown => None,
        }
    }

    /// 认领后的预览串；排除的事件返回 None
    pub fn display_string(&self, info: &CallingInfo) -> Option<String> {
        if info.exclude_from_history {
            return None;
        }
        Some(
            info.content
                .clone()
                .unwrap_or_else(|| localized("message.unsupported").to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CallProtocolType, Direction};

    struct FixedSource(Option<CallingInfo>);

    impl CallingDataSource for FixedSource {
        fn calling_info(&self, _envelope: &MessageEnvelope) -> Option<CallingInfo> {
            self.0.clone()
        }
    }

    fn info(participant_type: CallParticipantType) -> CallingInfo {
        CallingInfo {
            protocol_type: CallProtocolType::Send,
            media_type: CallMediaType::Voice,
            participant_type,
            role: CallRole::Caller,
            direction: Direction::Outgoing,
            exclude_from_history: false,
            content: Some("call started".to_string()),
            show_unread_point: false,
            use_receiver_avatar: true,
            participant_ids: vec!["u1".to_string(), "u2".to_string()],
        }
    }

    fn adapter() -> CallingMessageAdapter {
        CallingMessageAdapter::new(Arc::new(FixedSource(None)))
    }

    #[test]
    fn one_to_one_call_renders_as_text_cell_with_flags() {
        let envelope = MessageEnvelope::default();
        let cell = adapter()
            .cell_data(&info(CallParticipantType::OneToOne), &envelope)
            .expect("cell");
        match cell.variant {
            CellVariant::Text(text) => {
                assert_eq!(text.content, "call started");
                assert!(text.is_audio_call);
                assert!(!text.is_video_call);
                assert!(text.is_caller);
                assert!(text.use_receiver_avatar);
            }
            other => panic!("expected text cell, got {other:?}"),
        }
    }

    #[test]
    fn one_to_one_call_without_content_falls_back_to_unsupported() {
        let envelope = MessageEnvelope::default();
        let mut calling = info(CallParticipantType::OneToOne);
        calling.content = None;
        let cell = adapter().cell_data(&calling, &envelope).expect("cell");
        assert!(matches!(cell.variant, CellVariant::Unsupported(_)));
    }

    #[test]
    fn group_call_renders_as_system_cell_with_participants() {
        let envelope = MessageEnvelope::default();
        let cell = adapter()
            .cell_data(&info(CallParticipantType::Group), &envelope)
            .expect("cell");
        match cell.variant {
            CellVariant::System(system) => {
                assert_eq!(system.replaced_user_ids, vec!["u1", "u2"]);
                assert_eq!(system.content, "call started");
            }
            other => panic!("expected system cell, got {other:?}"),
        }
    }

    #[test]
    fn unknown_participant_type_is_suppressed() {
        let envelope = MessageEnvelope::default();
        assert!(adapter()
            .cell_data(&info(CallParticipantType::Unknown), &envelope)
            .is_none());
    }

    #[test]
    fn excluded_call_yields_nothing_on_both_channels() {
        let envelope = MessageEnvelope::default();
        let mut calling = info(CallParticipantType::OneToOne);
        calling.exclude_from_history = true;
        let adapter = adapter();
        assert!(adapter.cell_data(&calling, &envelope).is_none());
        assert!(adapter.display_string(&calling).is_none());
    }
}

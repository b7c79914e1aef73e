//! 撤回处理
//!
//! 撤回状态严格优先于其他派发规则。本端自撤的文本消息在时间
//! 窗口内允许重新编辑；窗口外或他人 / 管理员撤回永久不可重编辑，
//! 不做延迟复核。群内他人消息的撤回渲染为群提示单元。

use chrono::{DateTime, Utc};

use super::display::revoke_display_string;
use crate::config::PipelineConfig;
use crate::domain::model::{
    CellData, CellVariant, ElementType, JoinGroupCell, MessageEnvelope, RevokeCell,
};

pub struct RevokeHandler;

impl RevokeHandler {
    pub fn handle(
        envelope: &MessageEnvelope,
        config: &PipelineConfig,
        now: DateTime<Utc>,
    ) -> CellData {
        let content = revoke_display_string(envelope);

        if !envelope.is_self && envelope.in_group() {
            // 群内他人消息的撤回归为群提示，操作归属到撤回者
            let cell = JoinGroupCell {
                content,
                op_user_id: envelope.sender.clone(),
                op_user_name: envelope.sender_display_name().to_string(),
                ..Default::default()
            };
            return CellData::system_from_envelope(CellVariant::JoinGroup(cell), envelope);
        }

        let support_re_edit = envelope.is_self
            && envelope.element_type() == ElementType::Text
            && Self::within_reedit_window(envelope, config, now)
            && Self::revoked_by_sender(envelope);

        CellData::from_envelope(
            CellVariant::Revoke(RevokeCell {
                content,
                support_re_edit,
            }),
            envelope,
        )
    }

    fn within_reedit_window(
        envelope: &MessageEnvelope,
        config: &PipelineConfig,
        now: DateTime<Utc>,
    ) -> bool {
        let elapsed = now.signed_duration_since(envelope.timestamp);
        elapsed.abs() < config.reedit_window()
    }

    /// 撤回者与原发送者一致才算自撤；缺失撤回者信息视为自撤
    fn revoked_by_sender(envelope: &MessageEnvelope) -> bool {
        envelope
            .revoker
            .as_ref()
            .is_none_or(|revoker| revoker.user_id == envelope.sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::model::{Direction, MessageStatus, RevokerInfo, TextElement};
    use crate::domain::model::ElementPayload;

    fn revoked_text(is_self: bool, age_seconds: i64, now: DateTime<Utc>) -> MessageEnvelope {
        MessageEnvelope {
            msg_id: "m1".to_string(),
            sender: "me".to_string(),
            is_self,
            status: MessageStatus::LocallyRevoked,
            timestamp: now - Duration::seconds(age_seconds),
            element: ElementPayload::Text(TextElement {
                text: "hello".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn self_revoke_within_window_supports_re_edit() {
        let now = Utc::now();
        let cell = RevokeHandler::handle(
            &revoked_text(true, 30, now),
            &PipelineConfig::default(),
            now,
        );
        match cell.variant {
            CellVariant::Revoke(revoke) => assert!(revoke.support_re_edit),
            other => panic!("expected revoke cell, got {other:?}"),
        }
        assert_eq!(cell.direction, Direction::Outgoing);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let now = Utc::now();
        let cell = RevokeHandler::handle(
            &revoked_text(true, 120, now),
            &PipelineConfig::default(),
            now,
        );
        match cell.variant {
            CellVariant::Revoke(revoke) => assert!(!revoke.support_re_edit),
            other => panic!("expected revoke cell, got {other:?}"),
        }
    }

    #[test]
    fn moderator_revoke_never_supports_re_edit() {
        let now = Utc::now();
        let mut envelope = revoked_text(true, 10, now);
        envelope.revoker = Some(RevokerInfo {
            user_id: "admin".to_string(),
            display_name: None,
        });
        let cell = RevokeHandler::handle(&envelope, &PipelineConfig::default(), now);
        match cell.variant {
            CellVariant::Revoke(revoke) => assert!(!revoke.support_re_edit),
            other => panic!("expected revoke cell, got {other:?}"),
        }
    }

    #[test]
    fn window_is_configurable() {
        let now = Utc::now();
        let config = PipelineConfig {
            reedit_window_seconds: 300,
            ..Default::default()
        };
        let cell = RevokeHandler::handle(&revoked_text(true, 200, now), &config, now);
        match cell.variant {
            CellVariant::Revoke(revoke) => assert!(revoke.support_re_edit),
            other => panic!("expected revoke cell, got {other:?}"),
        }
    }

    #[test]
    fn group_revoke_of_others_message_becomes_group_tip() {
        let now = Utc::now();
        let mut envelope = revoked_text(false, 10, now);
        envelope.group_id = Some("g1".to_string());
        envelope.nick_name = Some("Dave".to_string());
        let cell = RevokeHandler::handle(&envelope, &PipelineConfig::default(), now);
        match cell.variant {
            CellVariant::JoinGroup(tip) => {
                assert_eq!(tip.op_user_id, "me");
                assert_eq!(tip.op_user_name, "Dave");
                assert_eq!(tip.content, "Dave recalled a message");
            }
            other => panic!("expected join-group cell, got {other:?}"),
        }
        assert_eq!(cell.direction, Direction::Incoming);
    }
}

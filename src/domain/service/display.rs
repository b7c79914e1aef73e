//! 展示文案渲染
//!
//! 群提示、撤回提示与各元素类型的预览串。渲染结果同时被分类
//! （系统单元内容）与预览两个输出通道消费。

use crate::domain::model::{
    ElementPayload, GroupChangeType, GroupMemberInfo, GroupTipType, GroupTipsElement,
    MessageEnvelope,
};
use crate::i18n::{localized, localized_format};

/// 操作者展示名；无操作者时为空串
pub fn op_user_name(tips: &GroupTipsElement) -> String {
    tips.op_member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_default()
}

pub fn user_name_list(members: &[GroupMemberInfo]) -> Vec<String> {
    members
        .iter()
        .map(|member| member.display_name().to_string())
        .collect()
}

pub fn user_id_list(members: &[GroupMemberInfo]) -> Vec<String> {
    members
        .iter()
        .filter(|member| !member.user_id.is_empty())
        .map(|member| member.user_id.clone())
        .collect()
}

/// 群提示文案；渲染为空串的提示会被整条丢弃
pub fn group_tips_display_string(tips: &GroupTipsElement) -> String {
    let op_user = op_user_name(tips);
    let users = user_name_list(&tips.member_list);
    let joined = users.join("、");

    match tips.tip_type {
        GroupTipType::Join => {
            if op_user.is_empty() {
                String::new()
            } else if users.is_empty() || (users.len() == 1 && users[0] == op_user) {
                localized_format("group.tips.join", &[&op_user])
            } else {
                localized_format("group.tips.invite", &[&op_user, &joined])
            }
        }
        GroupTipType::Invite => {
            if users.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.invite", &[&op_user, &joined])
            }
        }
        GroupTipType::Quit => {
            if op_user.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.quit", &[&op_user])
            }
        }
        GroupTipType::Kicked => {
            if users.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.kicked", &[&op_user, &joined])
            }
        }
        GroupTipType::SetAdmin => {
            if users.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.set_admin", &[&joined])
            }
        }
        GroupTipType::CancelAdmin => {
            if users.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.cancel_admin", &[&joined])
            }
        }
        GroupTipType::GroupInfoChange => {
            let rendered = group_info_changed_string(&op_user, &users, tips);
            // 片段以分隔符结尾，整体裁掉最后一个字符
            if rendered.is_empty() {
                rendered
            } else {
                let mut chars = rendered.chars();
                chars.next_back();
                chars.as_str().to_string()
            }
        }
        GroupTipType::MemberInfoChange => member_info_changed_string(tips),
        GroupTipType::PinnedMessageAdded => {
            if op_user.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.pin_message", &[&op_user])
            }
        }
        GroupTipType::PinnedMessageRemoved => {
            if op_user.is_empty() {
                String::new()
            } else {
                localized_format("group.tips.unpin_message", &[&op_user])
            }
        }
        GroupTipType::Unknown => String::new(),
    }
}

/// 群资料变更逐项拼接：每个片段把已累积文案作为 {0} 继续扩写
fn group_info_changed_string(
    op_user: &str,
    users: &[String],
    tips: &GroupTipsElement,
) -> String {
    let mut text = op_user.to_string();
    for info in &tips.group_change_list {
        match info.change_type {
            GroupChangeType::Name => {
                if let Some(value) = &info.value {
                    text = localized_format("group.change.name", &[&text, value]);
                }
            }
            GroupChangeType::Introduction => {
                if let Some(value) = &info.value {
                    text = localized_format("group.change.introduction", &[&text, value]);
                }
            }
            GroupChangeType::Announcement => {
                text = match &info.value {
                    Some(value) => {
                        localized_format("group.change.announcement", &[&text, value])
                    }
                    None => localized_format("group.change.announcement_removed", &[&text]),
                };
            }
            GroupChangeType::Avatar => {
                text = localized_format("group.change.avatar", &[&text]);
            }
            GroupChangeType::Owner => {
                let new_owner = users
                    .first()
                    .cloned()
                    .or_else(|| info.value.clone())
                    .unwrap_or_default();
                if !new_owner.is_empty() {
                    text = localized_format("group.change.owner", &[&text, &new_owner]);
                }
            }
            GroupChangeType::MuteAll => {
                let key = if info.bool_value {
                    "group.change.mute_all_on"
                } else {
                    "group.change.mute_all_off"
                };
                text = localized_format(key, &[op_user]);
            }
            GroupChangeType::JoinOption => {
                text = localized_format(
                    "group.change.join_option",
                    &[&text, group_option_description(info.int_value)],
                );
            }
            GroupChangeType::InviteOption => {
                text = localized_format(
                    "group.change.invite_option",
                    &[&text, group_option_description(info.int_value)],
                );
            }
        }
    }
    if text == op_user {
        // 没有任何可渲染的变更项
        String::new()
    } else {
        text
    }
}

fn group_option_description(option: i32) -> &'static str {
    match option {
        0 => localized("group.option.forbid"),
        1 => localized("group.option.approval"),
        2 => localized("group.option.any"),
        _ => "unknown",
    }
}

/// 成员禁言 / 解禁提示，只取第一条变更
fn member_info_changed_string(tips: &GroupTipsElement) -> String {
    let Some(info) = tips.member_change_list.first() else {
        return String::new();
    };
    let name = tips
        .member_list
        .iter()
        .find(|member| member.user_id == info.user_id)
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| info.user_id.clone());
    let key = if info.mute_seconds == 0 {
        "group.tips.unmute"
    } else {
        "group.tips.mute"
    };
    localized_format(key, &[&name])
}

/// 撤回提示文案
///
/// 操作者与发送者一致时按本端 / C2C 对端 / 群成员三种视角措辞；
/// 不一致（管理员代撤）时展示操作者名。
pub fn revoke_display_string(envelope: &MessageEnvelope) -> String {
    let sender = envelope.sender.as_str();
    let revoker_id = envelope
        .revoker
        .as_ref()
        .map(|revoker| revoker.user_id.as_str())
        .unwrap_or(sender);

    if revoker_id == sender {
        if envelope.is_self {
            localized("message.revoke.self").to_string()
        } else if envelope.user_id.as_deref().is_some_and(|id| !id.is_empty()) {
            localized("message.revoke.peer").to_string()
        } else if envelope.in_group() {
            localized_format("message.revoke.format", &[envelope.sender_display_name()])
        } else {
            localized("message.revoke.normal").to_string()
        }
    } else {
        let name = envelope
            .revoker
            .as_ref()
            .and_then(|revoker| revoker.display_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(revoker_id);
        localized_format("message.revoke.format", &[name])
    }
}

/// 元素类型各自的预览串；群提示与自定义元素由分类器走共享逻辑，这里不处理
pub fn element_preview(envelope: &MessageEnvelope) -> Option<String> {
    match &envelope.element {
        ElementPayload::Text(text) => Some(text.text.clone()),
        ElementPayload::Image(_) => Some(localized("message.type.image").to_string()),
        ElementPayload::Sound(_) => Some(localized("message.type.voice").to_string()),
        ElementPayload::Video(_) => Some(localized("message.type.video").to_string()),
        ElementPayload::File(_) => Some(localized("message.type.file").to_string()),
        ElementPayload::Face(_) => Some(localized("message.type.face").to_string()),
        ElementPayload::Merger(merger) => {
            if merger.title.is_empty() {
                Some(localized("message.type.merger").to_string())
            } else {
                Some(merger.title.clone())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GroupChangeInfo, MemberChangeInfo, RevokerInfo};

    fn member(user_id: &str, nick: &str) -> GroupMemberInfo {
        GroupMemberInfo {
            user_id: user_id.to_string(),
            nick_name: Some(nick.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn join_tip_uses_operator_name() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::Join,
            op_member: Some(member("u1", "Alice")),
            ..Default::default()
        };
        assert_eq!(group_tips_display_string(&tips), "Alice joined the group");
    }

    #[test]
    fn join_with_other_members_renders_as_invite() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::Join,
            op_member: Some(member("u1", "Alice")),
            member_list: vec![member("u2", "Bob")],
            ..Default::default()
        };
        assert_eq!(
            group_tips_display_string(&tips),
            "Alice invited Bob to the group"
        );
    }

    #[test]
    fn kicked_tip_lists_members() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::Kicked,
            op_member: Some(member("u1", "Alice")),
            member_list: vec![member("u2", "Bob"), member("u3", "Carol")],
            ..Default::default()
        };
        assert_eq!(
            group_tips_display_string(&tips),
            "Alice removed Bob、Carol from the group"
        );
    }

    #[test]
    fn group_info_change_concatenates_and_trims_separator() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::GroupInfoChange,
            op_member: Some(member("u1", "Alice")),
            group_change_list: vec![
                GroupChangeInfo {
                    change_type: GroupChangeType::Name,
                    value: Some("rustaceans".to_string()),
                    bool_value: false,
                    int_value: 0,
                },
                GroupChangeInfo {
                    change_type: GroupChangeType::Avatar,
                    value: None,
                    bool_value: false,
                    int_value: 0,
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            group_tips_display_string(&tips),
            "Alice changed the group name to rustaceans, changed the group avatar"
        );
    }

    #[test]
    fn group_info_change_without_items_is_empty() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::GroupInfoChange,
            op_member: Some(member("u1", "Alice")),
            ..Default::default()
        };
        assert_eq!(group_tips_display_string(&tips), "");
    }

    #[test]
    fn mute_tip_uses_member_display_name() {
        let tips = GroupTipsElement {
            tip_type: GroupTipType::MemberInfoChange,
            member_list: vec![member("u2", "Bob")],
            member_change_list: vec![MemberChangeInfo {
                user_id: "u2".to_string(),
                mute_seconds: 600,
            }],
            ..Default::default()
        };
        assert_eq!(group_tips_display_string(&tips), "Bob was muted");
    }

    #[test]
    fn revoke_wording_by_perspective() {
        let mut envelope = MessageEnvelope {
            sender: "me".to_string(),
            is_self: true,
            ..Default::default()
        };
        assert_eq!(revoke_display_string(&envelope), "You recalled a message");

        envelope.is_self = false;
        envelope.user_id = Some("me".to_string());
        assert_eq!(
            revoke_display_string(&envelope),
            "The other party recalled a message"
        );

        envelope.user_id = None;
        envelope.group_id = Some("g1".to_string());
        envelope.nick_name = Some("Dave".to_string());
        assert_eq!(revoke_display_string(&envelope), "Dave recalled a message");
    }

    #[test]
    fn moderator_revoke_shows_operator_name() {
        let envelope = MessageEnvelope {
            sender: "me".to_string(),
            is_self: true,
            group_id: Some("g1".to_string()),
            revoker: Some(RevokerInfo {
                user_id: "admin".to_string(),
                display_name: Some("Admin".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(revoke_display_string(&envelope), "Admin recalled a message");
    }
}

//! 本地化串查询
//!
//! 管线只按 key 取串；宿主可在展示层做真正的多语言替换。
//! 这里内置英文模板作为缺省值，`{0}`/`{1}` 为位置参数。

use std::collections::HashMap;

use once_cell::sync::Lazy;

static STRINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // 通用
        ("message.unsupported", "This type of message is not supported"),
        ("message.risk_content", "This message may contain risky content"),
        // 元素类型预览标签
        ("message.type.image", "[Image]"),
        ("message.type.voice", "[Voice]"),
        ("message.type.video", "[Video]"),
        ("message.type.file", "[File]"),
        ("message.type.face", "[Sticker]"),
        ("message.type.merger", "[Chat History]"),
        // 撤回
        ("message.revoke.normal", "A message was recalled"),
        ("message.revoke.self", "You recalled a message"),
        ("message.revoke.peer", "The other party recalled a message"),
        ("message.revoke.format", "{0} recalled a message"),
        // 群提示
        ("group.tips.join", "{0} joined the group"),
        ("group.tips.invite", "{0} invited {1} to the group"),
        ("group.tips.quit", "{0} left the group"),
        ("group.tips.kicked", "{0} removed {1} from the group"),
        ("group.tips.set_admin", "{0} was set as admin"),
        ("group.tips.cancel_admin", "{0} was dismissed from admin"),
        ("group.tips.pin_message", "{0} pinned a message"),
        ("group.tips.unpin_message", "{0} unpinned a message"),
        ("group.tips.mute", "{0} was muted"),
        ("group.tips.unmute", "{0} was unmuted"),
        // 群资料变更（片段以逗号结尾，拼接后裁掉末尾分隔符）
        ("group.change.name", "{0} changed the group name to {1},"),
        ("group.change.introduction", "{0} changed the group introduction to {1},"),
        ("group.change.announcement", "{0} changed the group announcement to {1},"),
        ("group.change.announcement_removed", "{0} removed the group announcement,"),
        ("group.change.avatar", "{0} changed the group avatar,"),
        ("group.change.owner", "{0} transferred group ownership to {1},"),
        ("group.change.mute_all_on", "{0} enabled mute-all,"),
        ("group.change.mute_all_off", "{0} disabled mute-all,"),
        ("group.change.join_option", "{0} changed the join option to {1},"),
        ("group.change.invite_option", "{0} changed the invite option to {1},"),
        // 进群/邀请审批选项描述
        ("group.option.forbid", "forbidden"),
        ("group.option.approval", "admin approval required"),
        ("group.option.any", "allowed for anyone"),
    ])
});

/// 按 key 取本地化模板；未命中时原样返回 key，便于排查缺失
pub fn localized(key: &str) -> &str {
    STRINGS.get(key).copied().unwrap_or(key)
}

/// 按 key 取模板并做位置参数替换
pub fn localized_format(key: &str, args: &[&str]) -> String {
    let mut out = localized(key).to_string();
    for (idx, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{idx}}}"), arg);
    }
    out
}

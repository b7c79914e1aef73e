//! 消息信封
//!
//! 管线消费的协议消息最小解码视图。由外部 IM SDK 在收发 / 拉取历史时
//! 构造，对管线只读。`msg_id` 一经赋值不可变，是富化阶段
//! （进度查询、回执查询）的关联键。

use chrono::{DateTime, TimeZone, Utc};

/// 元素类型（信封载荷的判别值）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    Text,
    Image,
    Sound,
    Video,
    File,
    Face,
    GroupTips,
    Merger,
    Custom,
    Unknown,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Sound => "sound",
            ElementType::Video => "video",
            ElementType::File => "file",
            ElementType::Face => "face",
            ElementType::GroupTips => "group_tips",
            ElementType::Merger => "merger",
            ElementType::Custom => "custom",
            ElementType::Unknown => "unknown",
        }
    }
}

/// 消息收发状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageStatus {
    Initial,
    Sending,
    SendFailed,
    SendSucceeded,
    /// 本地已撤回（撤回标记由 IM SDK 写入）
    LocallyRevoked,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub path: String,
    pub uuid: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SoundElement {
    pub path: String,
    pub uuid: String,
    pub duration_seconds: u32,
    pub data_size: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoElement {
    pub path: String,
    pub uuid: String,
    pub duration_seconds: u32,
    pub snapshot_uuid: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FileElement {
    pub path: String,
    pub uuid: String,
    pub file_name: String,
    pub file_size: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceElement {
    pub index: i32,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MergerElement {
    pub title: String,
    pub abstract_list: Vec<String>,
}

/// 自定义元素：不透明 JSON 载荷，业务路由键从中提取
#[derive(Clone, Debug, PartialEq)]
pub struct CustomElement {
    pub data: Vec<u8>,
    pub description: String,
    pub extension: String,
}

/// 群提示子类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupTipType {
    Join,
    Invite,
    Quit,
    Kicked,
    SetAdmin,
    CancelAdmin,
    GroupInfoChange,
    MemberInfoChange,
    PinnedMessageAdded,
    PinnedMessageRemoved,
    Unknown,
}

/// 群成员信息（名称展示按名片 -> 好友备注 -> 昵称 -> 用户 ID 取第一个非空）
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupMemberInfo {
    pub user_id: String,
    pub name_card: Option<String>,
    pub friend_remark: Option<String>,
    pub nick_name: Option<String>,
}

impl GroupMemberInfo {
    pub fn display_name(&self) -> &str {
        pick_display_name(
            self.name_card.as_deref(),
            self.friend_remark.as_deref(),
            self.nick_name.as_deref(),
        )
        .unwrap_or(&self.user_id)
    }
}

/// 群资料变更类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupChangeType {
    Name,
    Introduction,
    Announcement,
    Avatar,
    Owner,
    MuteAll,
    JoinOption,
    InviteOption,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupChangeInfo {
    pub change_type: GroupChangeType,
    pub value: Option<String>,
    pub bool_value: bool,
    pub int_value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberChangeInfo {
    pub user_id: String,
    /// 0 表示解除禁言
    pub mute_seconds: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupTipsElement {
    pub tip_type: GroupTipType,
    pub op_member: Option<GroupMemberInfo>,
    pub member_list: Vec<GroupMemberInfo>,
    pub group_change_list: Vec<GroupChangeInfo>,
    pub member_change_list: Vec<MemberChangeInfo>,
}

impl Default for GroupTipType {
    fn default() -> Self {
        GroupTipType::Unknown
    }
}

/// 元素载荷（每个信封恰好携带一种）
#[derive(Clone, Debug, PartialEq)]
pub enum ElementPayload {
    Text(TextElement),
    Image(ImageElement),
    Sound(SoundElement),
    Video(VideoElement),
    File(FileElement),
    Face(FaceElement),
    GroupTips(GroupTipsElement),
    Merger(MergerElement),
    Custom(CustomElement),
    Unknown,
}

impl ElementPayload {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementPayload::Text(_) => ElementType::Text,
            ElementPayload::Image(_) => ElementType::Image,
            ElementPayload::Sound(_) => ElementType::Sound,
            ElementPayload::Video(_) => ElementType::Video,
            ElementPayload::File(_) => ElementType::File,
            ElementPayload::Face(_) => ElementType::Face,
            ElementPayload::GroupTips(_) => ElementType::GroupTips,
            ElementPayload::Merger(_) => ElementType::Merger,
            ElementPayload::Custom(_) => ElementType::Custom,
            ElementPayload::Unknown => ElementType::Unknown,
        }
    }
}

/// 云端自定义标记，影响分类优先级
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudCustomFlag {
    Reply,
    Reference,
    RepliesCount,
}

/// 信令子协议载荷（通话 / 邀请事件）
#[derive(Clone, Debug, PartialEq)]
pub struct SignalingInfo {
    pub group_id: Option<String>,
    /// JSON 文本
    pub data: String,
}

/// 撤回操作者（与发送者不同说明是管理员代撤）
#[derive(Clone, Debug, PartialEq)]
pub struct RevokerInfo {
    pub user_id: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageEnvelope {
    /// 稳定标识，富化阶段的关联键
    pub msg_id: String,
    pub sender: String,
    pub name_card: Option<String>,
    pub friend_remark: Option<String>,
    pub nick_name: Option<String>,
    /// C2C 对端
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_self: bool,
    pub has_risk_content: bool,
    pub needs_read_receipt: bool,
    pub status: MessageStatus,
    pub element: ElementPayload,
    pub cloud_custom_flags: Vec<CloudCustomFlag>,
    /// 云端自定义数据（回复列表等，JSON）
    pub cloud_custom_data: Option<Vec<u8>>,
    pub excluded_from_last_message: bool,
    pub excluded_from_unread_count: bool,
    pub revoker: Option<RevokerInfo>,
    pub signaling: Option<SignalingInfo>,
}

impl MessageEnvelope {
    pub fn element_type(&self) -> ElementType {
        self.element.element_type()
    }

    pub fn has_cloud_custom(&self, flag: CloudCustomFlag) -> bool {
        self.cloud_custom_flags.contains(&flag)
    }

    pub fn in_group(&self) -> bool {
        self.group_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// 发送者展示名：名片 -> 好友备注 -> 昵称 -> 用户 ID
    pub fn sender_display_name(&self) -> &str {
        pick_display_name(
            self.name_card.as_deref(),
            self.friend_remark.as_deref(),
            self.nick_name.as_deref(),
        )
        .unwrap_or(&self.sender)
    }
}

impl Default for MessageEnvelope {
    fn default() -> Self {
        Self {
            msg_id: String::new(),
            sender: String::new(),
            name_card: None,
            friend_remark: None,
            nick_name: None,
            user_id: None,
            group_id: None,
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            is_self: false,
            has_risk_content: false,
            needs_read_receipt: false,
            status: MessageStatus::Initial,
            element: ElementPayload::Unknown,
            cloud_custom_flags: Vec::new(),
            cloud_custom_data: None,
            excluded_from_last_message: false,
            excluded_from_unread_count: false,
            revoker: None,
            signaling: None,
        }
    }
}

fn pick_display_name<'a>(
    name_card: Option<&'a str>,
    friend_remark: Option<&'a str>,
    nick_name: Option<&'a str>,
) -> Option<&'a str> {
    [name_card, friend_remark, nick_name]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
}

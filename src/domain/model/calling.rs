//! 通话信令抽象
//!
//! 通话消息的判定与解析由外部协作方（通话数据源）完成，
//! 管线只消费这里的已解析视图。

use super::cell_data::Direction;

/// 通话协议类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallProtocolType {
    Unknown,
    Send,
    Accept,
    Reject,
    Cancel,
    Hangup,
    Timeout,
    LineBusy,
    SwitchToAudio,
    SwitchToAudioConfirm,
}

/// 通话流媒体类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallMediaType {
    Unknown,
    Voice,
    Video,
}

/// 通话参与类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallParticipantType {
    Unknown,
    OneToOne,
    Group,
}

/// 参与角色
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallRole {
    Unknown,
    Caller,
    Callee,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallingInfo {
    pub protocol_type: CallProtocolType,
    pub media_type: CallMediaType,
    pub participant_type: CallParticipantType,
    pub role: CallRole,
    pub direction: Direction,
    /// 为 true 时该通话事件不进入时间线与预览
    pub exclude_from_history: bool,
    pub content: Option<String>,
    pub show_unread_point: bool,
    pub use_receiver_avatar: bool,
    pub participant_ids: Vec<String>,
}

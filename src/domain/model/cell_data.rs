//! 单元数据
//!
//! 分类输出：每个信封恰好产出一个变体，或显式丢弃（返回 None）。
//! 单元数据构造后仅由富化步骤就地修改，交给展示层后不再变更；
//! 撤回通知走重新分类路径而非原地改写。

use serde::Deserialize;

use super::envelope::MessageEnvelope;

/// 展示方向
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// 展示状态（由信封收发状态映射而来）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStatus {
    None,
    Sending,
    Sent,
    Failed,
}

/// 系统单元子类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemCellKind {
    Plain,
    DateSeparator,
}

/// 下载进度快照（progress 为 0-100）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadState {
    pub progress: u32,
    pub is_downloading: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextCell {
    pub content: String,
    // 通话消息复用文本单元时携带的标记
    pub is_audio_call: bool,
    pub is_video_call: bool,
    pub is_caller: bool,
    pub show_unread_point: bool,
    pub use_receiver_avatar: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SystemCell {
    pub content: String,
    pub kind: SystemCellKind,
    /// 展示层用展示名替换 `{userID}` 占位符的候选列表
    pub replaced_user_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinGroupCell {
    pub content: String,
    pub op_user_id: String,
    pub op_user_name: String,
    pub user_name_list: Vec<String>,
    pub user_id_list: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevokeCell {
    pub content: String,
    /// 重新编辑窗口内的自撤文本消息才允许重编辑
    pub support_re_edit: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoiceCell {
    pub path: String,
    pub uuid: String,
    pub duration_seconds: u32,
    pub data_size: u64,
    pub download: DownloadState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageCell {
    pub path: String,
    pub uuid: String,
    pub width: u32,
    pub height: u32,
    pub upload_progress: u32,
    pub download: DownloadState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoCell {
    pub path: String,
    pub uuid: String,
    pub duration_seconds: u32,
    pub snapshot_uuid: Option<String>,
    pub upload_progress: u32,
    pub download: DownloadState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileCell {
    pub path: String,
    pub uuid: String,
    pub file_name: String,
    pub file_size: u64,
    pub upload_progress: u32,
    pub download: DownloadState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceCell {
    pub index: i32,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergerCell {
    pub title: String,
    pub abstract_list: Vec<String>,
}

/// 由注册表构建器产出的业务单元，载荷对管线不透明
#[derive(Clone, Debug, PartialEq)]
pub struct CustomBusinessCell {
    pub business_id: String,
    pub payload: serde_json::Value,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnsupportedCell {
    pub placeholder: String,
}

/// 回复摘要（云端自定义数据中的回复列表项）
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReplyDigest {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellVariant {
    Text(TextCell),
    System(SystemCell),
    JoinGroup(JoinGroupCell),
    Revoke(RevokeCell),
    Voice(VoiceCell),
    Image(ImageCell),
    Video(VideoCell),
    File(FileCell),
    Face(FaceCell),
    Merger(MergerCell),
    CustomBusiness(CustomBusinessCell),
    Unsupported(UnsupportedCell),
}

impl CellVariant {
    /// 缺省复用键，标识展示层渲染器；业务单元由分类器改写为业务 ID
    pub fn default_reuse_key(&self) -> &'static str {
        match self {
            CellVariant::Text(_) => "text",
            CellVariant::System(_) => "system",
            CellVariant::JoinGroup(_) => "join_group",
            // 撤回与不支持占位均复用既有渲染器
            CellVariant::Revoke(_) => "system",
            CellVariant::Voice(_) => "voice",
            CellVariant::Image(_) => "image",
            CellVariant::Video(_) => "video",
            CellVariant::File(_) => "file",
            CellVariant::Face(_) => "face",
            CellVariant::Merger(_) => "merger",
            CellVariant::CustomBusiness(_) => "custom",
            CellVariant::Unsupported(_) => "text",
        }
    }

    /// 系统样式变体不展示发送者名，也不参与回复数标注
    pub fn is_system_like(&self) -> bool {
        matches!(
            self,
            CellVariant::System(_) | CellVariant::JoinGroup(_) | CellVariant::Revoke(_)
        )
    }

    pub fn upload_progress_mut(&mut self) -> Option<&mut u32> {
        match self {
            CellVariant::Image(cell) => Some(&mut cell.upload_progress),
            CellVariant::Video(cell) => Some(&mut cell.upload_progress),
            CellVariant::File(cell) => Some(&mut cell.upload_progress),
            _ => None,
        }
    }

    pub fn download_mut(&mut self) -> Option<&mut DownloadState> {
        match self {
            CellVariant::Voice(cell) => Some(&mut cell.download),
            CellVariant::Image(cell) => Some(&mut cell.download),
            CellVariant::Video(cell) => Some(&mut cell.download),
            CellVariant::File(cell) => Some(&mut cell.download),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellData {
    pub msg_id: String,
    pub direction: Direction,
    pub show_name: bool,
    pub status: CellStatus,
    pub reuse_key: String,
    pub needs_read_receipt: bool,
    pub show_replies: bool,
    pub replies: Vec<ReplyDigest>,
    pub variant: CellVariant,
}

impl CellData {
    pub fn new(variant: CellVariant, direction: Direction) -> Self {
        let reuse_key = variant.default_reuse_key().to_string();
        Self {
            msg_id: String::new(),
            direction,
            show_name: false,
            status: CellStatus::None,
            reuse_key,
            needs_read_receipt: false,
            show_replies: false,
            replies: Vec::new(),
            variant,
        }
    }

    /// 从信封构造：方向按是否本端发送推导，并带上关联键与回执标记
    pub fn from_envelope(variant: CellVariant, envelope: &MessageEnvelope) -> Self {
        let direction = if envelope.is_self {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };
        let mut data = Self::new(variant, direction);
        data.msg_id = envelope.msg_id.clone();
        data.needs_read_receipt = envelope.needs_read_receipt;
        data
    }

    /// 系统样式单元固定为接收方向
    pub fn system_from_envelope(variant: CellVariant, envelope: &MessageEnvelope) -> Self {
        let mut data = Self::new(variant, Direction::Incoming);
        data.msg_id = envelope.msg_id.clone();
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_renders_through_text_cell() {
        let cell = CellData::new(
            CellVariant::Unsupported(UnsupportedCell::default()),
            Direction::Incoming,
        );
        assert_eq!(cell.reuse_key, "text");
    }

    #[test]
    fn media_variants_expose_progress_capability() {
        let mut image = CellVariant::Image(ImageCell::default());
        assert!(image.upload_progress_mut().is_some());
        assert!(image.download_mut().is_some());

        let mut voice = CellVariant::Voice(VoiceCell::default());
        assert!(voice.upload_progress_mut().is_none());
        assert!(voice.download_mut().is_some());

        let mut text = CellVariant::Text(TextCell::default());
        assert!(text.upload_progress_mut().is_none());
        assert!(text.download_mut().is_none());
    }
}

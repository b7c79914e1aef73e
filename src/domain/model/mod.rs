mod business;
mod calling;
mod cell_data;
mod envelope;

pub use business::{business_ids, BusinessRoute};
pub use calling::{
    CallMediaType, CallParticipantType, CallProtocolType, CallRole, CallingInfo,
};
pub use cell_data::{
    CellData, CellStatus, CellVariant, CustomBusinessCell, Direction, DownloadState, FaceCell,
    FileCell, ImageCell, JoinGroupCell, MergerCell, ReplyDigest, RevokeCell, SystemCell,
    SystemCellKind, TextCell, UnsupportedCell, VideoCell, VoiceCell,
};
pub use envelope::{
    CloudCustomFlag, CustomElement, ElementPayload, ElementType, FaceElement, FileElement,
    GroupChangeInfo, GroupChangeType, GroupMemberInfo, GroupTipType, GroupTipsElement,
    ImageElement, MemberChangeInfo, MergerElement, MessageEnvelope, MessageStatus, RevokerInfo,
    SignalingInfo, SoundElement, TextElement, VideoElement,
};

//! 单元数据派发
//!
//! 管线入口：对每个信封沿规则链做单次遍历，同时得到单元数据与
//! 预览串。分类是信封加只读查询的纯函数，不持有可变状态；逐条
//! 消息相互独立，调用方可以按需并行。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::business_id::BusinessIdResolver;
use super::calling_adapter::CallingMessageAdapter;
use super::display::{
    element_preview, group_tips_display_string, op_user_name, user_id_list, user_name_list,
};
use super::enricher::CellDataEnricher;
use super::revoke::RevokeHandler;
use super::rules::{Rule, RuleDecision, RuleOutcome};
use crate::config::PipelineConfig;
use crate::domain::model::{
    CellData, CellVariant, CloudCustomFlag, ElementPayload, FaceCell, FileCell, GroupTipType,
    GroupTipsElement, ImageCell, JoinGroupCell, MergerCell, MessageEnvelope, MessageStatus,
    SystemCell, SystemCellKind, TextCell, UnsupportedCell, VideoCell, VoiceCell,
};
use crate::domain::repository::{
    CallingDataSource, CellBuilderRegistry, ProgressStore,
};
use crate::i18n::localized;

/// 单次遍历的两路输出
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutcome {
    /// None 表示该消息不进入时间线
    pub cell: Option<CellData>,
    /// None 表示该消息不出现在会话列表预览
    pub display: Option<String>,
}

pub struct CellPipeline {
    config: PipelineConfig,
    registry: Arc<dyn CellBuilderRegistry>,
    calling: CallingMessageAdapter,
    progress: Arc<dyn ProgressStore>,
}

impl CellPipeline {
    /// 依赖全部显式注入，进程级生命周期由宿主的组装根管理
    pub fn new(
        config: PipelineConfig,
        registry: Arc<dyn CellBuilderRegistry>,
        calling_source: Arc<dyn CallingDataSource>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        Self {
            config,
            registry,
            calling: CallingMessageAdapter::new(calling_source),
            progress,
        }
    }

    /// 分类：信封 -> 单元数据，None 为显式丢弃
    pub fn classify(&self, envelope: &MessageEnvelope) -> Option<CellData> {
        self.process(envelope).cell
    }

    /// 预览：信封 -> 会话列表预览串，None 表示从预览中省略
    pub fn display_string(&self, envelope: &MessageEnvelope) -> Option<String> {
        self.process(envelope).display
    }

    pub fn process(&self, envelope: &MessageEnvelope) -> PipelineOutcome {
        self.process_at(envelope, Utc::now())
    }

    /// 以显式时间点遍历规则链；重编辑窗口判定依赖 `now`
    pub fn process_at(&self, envelope: &MessageEnvelope, now: DateTime<Utc>) -> PipelineOutcome {
        let mut cell: Option<RuleDecision<CellData>> = None;
        let mut display: Option<RuleDecision<String>> = None;

        for rule in Rule::CHAIN {
            let outcome = self.apply_rule(rule, envelope, now);
            if cell.is_none() && !outcome.cell.is_skip() {
                cell = Some(outcome.cell);
            }
            if display.is_none() && !outcome.display.is_skip() {
                display = Some(outcome.display);
            }
            if cell.is_some() && display.is_some() {
                break;
            }
        }

        let mut cell = cell.and_then(RuleDecision::into_option);
        let display = display.and_then(RuleDecision::into_option);

        if let Some(data) = cell.as_mut() {
            CellDataEnricher::enrich(data, envelope, self.progress.as_ref());
        }
        if cell.is_none() && display.is_none() {
            debug!(msg_id = %envelope.msg_id, "message suppressed from timeline and preview");
        }

        PipelineOutcome { cell, display }
    }

    fn apply_rule(
        &self,
        rule: Rule,
        envelope: &MessageEnvelope,
        now: DateTime<Utc>,
    ) -> RuleOutcome<CellData, String> {
        match rule {
            Rule::Risk => self.risk_rule(envelope),
            Rule::Revoke => self.revoke_rule(envelope, now),
            Rule::CloudCustom => self.cloud_custom_rule(envelope),
            Rule::Element => self.element_rule(envelope),
        }
    }

    /// 风险内容压过预览通道的一切文案，撤回除外
    fn risk_rule(&self, envelope: &MessageEnvelope) -> RuleOutcome<CellData, String> {
        if envelope.has_risk_content && envelope.status != MessageStatus::LocallyRevoked {
            return RuleOutcome {
                cell: RuleDecision::Skip,
                display: RuleDecision::Produce(localized("message.risk_content").to_string()),
            };
        }
        RuleOutcome::skip()
    }

    fn revoke_rule(
        &self,
        envelope: &MessageEnvelope,
        now: DateTime<Utc>,
    ) -> RuleOutcome<CellData, String> {
        if envelope.status != MessageStatus::LocallyRevoked {
            return RuleOutcome::skip();
        }
        let cell = RevokeHandler::handle(envelope, &self.config, now);
        let display = super::display::revoke_display_string(envelope);
        RuleOutcome::produce_both(cell, display)
    }

    /// 回复 / 引用标记优先于元素类型派发；未注册构建器时落回链尾
    fn cloud_custom_rule(&self, envelope: &MessageEnvelope) -> RuleOutcome<CellData, String> {
        let builder = if envelope.has_cloud_custom(CloudCustomFlag::Reply) {
            self.registry.reply_builder()
        } else if envelope.has_cloud_custom(CloudCustomFlag::Reference) {
            self.registry.reference_builder()
        } else {
            None
        };
        match builder {
            Some(builder) => RuleOutcome {
                cell: RuleDecision::Produce(builder.build(envelope)),
                display: RuleDecision::Skip,
            },
            None => RuleOutcome::skip(),
        }
    }

    fn element_rule(&self, envelope: &MessageEnvelope) -> RuleOutcome<CellData, String> {
        match &envelope.element {
            ElementPayload::Text(text) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Text(TextCell {
                        content: text.text.clone(),
                        ..Default::default()
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::Image(image) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Image(ImageCell {
                        path: image.path.clone(),
                        uuid: image.uuid.clone(),
                        width: image.width,
                        height: image.height,
                        ..Default::default()
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::Sound(sound) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Voice(VoiceCell {
                        path: sound.path.clone(),
                        uuid: sound.uuid.clone(),
                        duration_seconds: sound.duration_seconds,
                        data_size: sound.data_size,
                        ..Default::default()
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::Video(video) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Video(VideoCell {
                        path: video.path.clone(),
                        uuid: video.uuid.clone(),
                        duration_seconds: video.duration_seconds,
                        snapshot_uuid: video.snapshot_uuid.clone(),
                        ..Default::default()
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::File(file) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::File(FileCell {
                        path: file.path.clone(),
                        uuid: file.uuid.clone(),
                        file_name: file.file_name.clone(),
                        file_size: file.file_size,
                        ..Default::default()
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::Face(face) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Face(FaceCell {
                        index: face.index,
                        data: face.data.clone(),
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::Merger(merger) => RuleOutcome::produce_both(
                CellData::from_envelope(
                    CellVariant::Merger(MergerCell {
                        title: merger.title.clone(),
                        abstract_list: merger.abstract_list.clone(),
                    }),
                    envelope,
                ),
                element_preview(envelope).unwrap_or_default(),
            ),
            ElementPayload::GroupTips(tips) => self.group_tips_rule(envelope, tips),
            ElementPayload::Custom(_) => self.custom_rule(envelope),
            ElementPayload::Unknown => self.unsupported_outcome(envelope),
        }
    }

    /// 群提示子派发：成员变动类渲染为进群单元，其余为系统单元；
    /// 文案为空时整条丢弃（两个通道一致）
    fn group_tips_rule(
        &self,
        envelope: &MessageEnvelope,
        tips: &GroupTipsElement,
    ) -> RuleOutcome<CellData, String> {
        let content = group_tips_display_string(tips);
        if content.is_empty() {
            debug!(msg_id = %envelope.msg_id, "group tip rendered empty, dropping");
            return RuleOutcome::suppress_both();
        }

        let membership_tip = matches!(
            tips.tip_type,
            GroupTipType::Join
                | GroupTipType::Invite
                | GroupTipType::Kicked
                | GroupTipType::GroupInfoChange
                | GroupTipType::Quit
                | GroupTipType::PinnedMessageAdded
                | GroupTipType::PinnedMessageRemoved
        );

        let cell = if membership_tip {
            let (op_user_id, op_name) = tips
                .op_member
                .as_ref()
                .map(|member| (member.user_id.clone(), op_user_name(tips)))
                .unwrap_or_default();
            CellData::system_from_envelope(
                CellVariant::JoinGroup(JoinGroupCell {
                    content: content.clone(),
                    op_user_id,
                    op_user_name: op_name,
                    user_name_list: user_name_list(&tips.member_list),
                    user_id_list: user_id_list(&tips.member_list),
                }),
                envelope,
            )
        } else {
            CellData::system_from_envelope(
                CellVariant::System(SystemCell {
                    content: content.clone(),
                    kind: SystemCellKind::Plain,
                    replaced_user_ids: Vec::new(),
                }),
                envelope,
            )
        };
        RuleOutcome::produce_both(cell, content)
    }

    /// 自定义消息派发：通话适配 -> 业务路由 -> 注册表构建器
    fn custom_rule(&self, envelope: &MessageEnvelope) -> RuleOutcome<CellData, String> {
        if let Some(info) = self.calling.claim(envelope) {
            if info.exclude_from_history {
                return RuleOutcome::suppress_both();
            }
            return RuleOutcome {
                cell: self.calling.cell_data(&info, envelope).into(),
                display: self.calling.display_string(&info).into(),
            };
        }

        let route = BusinessIdResolver::resolve(envelope);
        if route.exclude_from_history {
            return RuleOutcome::suppress_both();
        }
        if route.is_empty() {
            return self.unsupported_outcome(envelope);
        }

        match self.registry.builder_for(&route.business_id) {
            Some(builder) => {
                let mut data = builder.build(envelope);
                let cell = if builder.should_hide(&data) {
                    RuleDecision::Suppress
                } else {
                    data.reuse_key = route.business_id.clone();
                    RuleDecision::Produce(data)
                };
                RuleOutcome {
                    cell,
                    display: builder.display_string(envelope).into(),
                }
            }
            None if route.drops_silently() => {
                debug!(
                    msg_id = %envelope.msg_id,
                    business_id = %route.business_id,
                    "no builder registered, dropping by business id"
                );
                RuleOutcome::suppress_both()
            }
            None => self.unsupported_outcome(envelope),
        }
    }

    fn unsupported_outcome(&self, envelope: &MessageEnvelope) -> RuleOutcome<CellData, String> {
        let placeholder = localized("message.unsupported").to_string();
        RuleOutcome::produce_both(
            CellData::from_envelope(
                CellVariant::Unsupported(UnsupportedCell {
                    placeholder: placeholder.clone(),
                }),
                envelope,
            ),
            placeholder,
        )
    }
}

/// 日期分隔单元（由调用方在相邻消息间隔过大时插入）
pub fn date_separator_cell(date: DateTime<Utc>) -> CellData {
    CellData::new(
        CellVariant::System(SystemCell {
            content: date.format("%Y-%m-%d %H:%M").to_string(),
            kind: SystemCellKind::DateSeparator,
            replaced_user_ids: Vec::new(),
        }),
        crate::domain::model::Direction::Outgoing,
    )
}

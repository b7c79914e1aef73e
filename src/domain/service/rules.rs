//! 分类规则链
//!
//! 分类与预览共享同一条有序规则链：每条规则对两个输出通道分别
//! 给出决策，单次遍历同时产出单元数据与预览串，两棵决策树不会
//! 各自漂移。
//!
//! - `Skip`：本规则不处理该通道，落给链上的下一条规则
//! - `Produce`：本通道产出结果，该通道终结
//! - `Suppress`：显式压制，该通道以 None 终结（刻意丢弃，非错误）

#[derive(Clone, Debug, PartialEq)]
pub enum RuleDecision<T> {
    Skip,
    Produce(T),
    Suppress,
}

impl<T> RuleDecision<T> {
    pub fn is_skip(&self) -> bool {
        matches!(self, RuleDecision::Skip)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            RuleDecision::Produce(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for RuleDecision<T> {
    /// 把协作方的 Option 语义映射为「产出或压制」
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => RuleDecision::Produce(inner),
            None => RuleDecision::Suppress,
        }
    }
}

pub struct RuleOutcome<C, D> {
    pub cell: RuleDecision<C>,
    pub display: RuleDecision<D>,
}

impl<C, D> RuleOutcome<C, D> {
    pub fn skip() -> Self {
        Self {
            cell: RuleDecision::Skip,
            display: RuleDecision::Skip,
        }
    }

    pub fn suppress_both() -> Self {
        Self {
            cell: RuleDecision::Suppress,
            display: RuleDecision::Suppress,
        }
    }

    pub fn produce_both(cell: C, display: D) -> Self {
        Self {
            cell: RuleDecision::Produce(cell),
            display: RuleDecision::Produce(display),
        }
    }
}

/// 规则链条目，遍历顺序即优先级
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// 风险内容：只影响预览通道
    Risk,
    /// 撤回状态：严格优先于此后所有派发
    Revoke,
    /// 云端自定义标记（回复 / 引用）：只影响单元通道
    CloudCustom,
    /// 元素类型派发：链尾，两个通道都在这里收敛
    Element,
}

impl Rule {
    pub const CHAIN: [Rule; 4] = [Rule::Risk, Rule::Revoke, Rule::CloudCustom, Rule::Element];
}

//! 管线配置
//!
//! 配置由宿主在组装根加载一次后按值注入，管线内部不读全局状态。

use std::env;

use chrono::Duration;

/// 通话消息外观：详情样式保留全部通话事件，精简样式允许从历史中排除
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallingAppearance {
    Details,
    Simplify,
}

impl CallingAppearance {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "details" => Some(Self::Details),
            "simplify" => Some(Self::Simplify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Simplify => "simplify",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// 撤回后允许重新编辑的时间窗口（秒）
    pub reedit_window_seconds: u64,
    pub calling_appearance: CallingAppearance,
}

fn env_or_fallback(primary: &str, fallback: &str) -> Option<String> {
    env::var(primary).ok().or_else(|| env::var(fallback).ok())
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let reedit_window_seconds = env_or_fallback(
            "EMBER_CELL_REEDIT_WINDOW_SECONDS",
            "CHAT_REEDIT_WINDOW_SECONDS",
        )
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(120);

        let calling_appearance = env_or_fallback(
            "EMBER_CELL_CALLING_APPEARANCE",
            "CHAT_CALLING_APPEARANCE",
        )
        .as_deref()
        .and_then(CallingAppearance::from_str)
        .unwrap_or(CallingAppearance::Details);

        Self {
            reedit_window_seconds,
            calling_appearance,
        }
    }

    pub fn reedit_window(&self) -> Duration {
        Duration::seconds(self.reedit_window_seconds as i64)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reedit_window_seconds: 120,
            calling_appearance: CallingAppearance::Details,
        }
    }
}

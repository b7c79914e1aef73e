//! 业务路由解析
//!
//! 从自定义元素 / 信令载荷的 JSON 中提取业务 ID。纯函数，无 I/O；
//! 载荷损坏只记日志并返回空路由，不向上抛错。

use serde_json::Value;
use tracing::debug;

use crate::domain::model::{business_ids, BusinessRoute, ElementPayload, MessageEnvelope};
use crate::error::Result;

pub struct BusinessIdResolver;

impl BusinessIdResolver {
    pub fn resolve(envelope: &MessageEnvelope) -> BusinessRoute {
        if let Some(signaling) = &envelope.signaling {
            // 信令消息：是否排除由信封上两个独立标记同时成立决定
            let exclude_from_history =
                envelope.excluded_from_last_message && envelope.excluded_from_unread_count;
            let business_id = match Self::signaling_business_id(signaling.data.as_bytes()) {
                Ok(id) => id,
                Err(err) => {
                    debug!(msg_id = %envelope.msg_id, error = %err, "failed to parse signaling payload");
                    String::new()
                }
            };
            return BusinessRoute {
                business_id,
                exclude_from_history,
            };
        }

        if let ElementPayload::Custom(custom) = &envelope.element {
            let business_id = match Self::custom_business_id(&custom.data) {
                Ok(id) => id,
                Err(err) => {
                    debug!(msg_id = %envelope.msg_id, error = %err, "failed to parse custom payload");
                    String::new()
                }
            };
            return BusinessRoute {
                business_id,
                exclude_from_history: false,
            };
        }

        BusinessRoute::empty()
    }

    /// 自定义元素载荷的路由键提取，优先级：
    /// 直接 businessID 字段 -> 客服插件键 -> 机器人插件键
    fn custom_business_id(data: &[u8]) -> Result<String> {
        let param: Value = serde_json::from_slice(data)?;

        if let Some(business_id) = param.get("businessID").and_then(Value::as_str) {
            if !business_id.is_empty() {
                return Ok(business_id.to_string());
            }
        }

        if param.get(business_ids::CUSTOMER_SERVICE_PREFIX).is_some() {
            if let Some(src) = param.get("src").and_then(Value::as_str) {
                if !src.is_empty() {
                    return Ok(format!("{}{}", business_ids::CUSTOMER_SERVICE_PREFIX, src));
                }
            }
        }

        if param.get(business_ids::CHATBOT).is_some() {
            if let Some(src) = param.get("src").and_then(Value::as_f64) {
                if src == business_ids::CHATBOT_IGNORED_SRC {
                    return Ok(business_ids::IGNORE_MESSAGE.to_string());
                }
            }
            return Ok(business_ids::CHATBOT.to_string());
        }

        Ok(String::new())
    }

    fn signaling_business_id(data: &[u8]) -> Result<String> {
        let param: Value = serde_json::from_slice(data)?;
        Ok(param
            .get("businessID")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CustomElement, SignalingInfo};

    fn custom_envelope(payload: &str) -> MessageEnvelope {
        MessageEnvelope {
            msg_id: "m1".to_string(),
            element: ElementPayload::Custom(CustomElement {
                data: payload.as_bytes().to_vec(),
                description: String::new(),
                extension: String::new(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn direct_business_id_wins() {
        let route = BusinessIdResolver::resolve(&custom_envelope(
            r#"{"businessID":"order_card","src":"9"}"#,
        ));
        assert_eq!(route.business_id, "order_card");
        assert!(!route.exclude_from_history);
    }

    #[test]
    fn customer_service_id_is_synthesized_from_src() {
        let route = BusinessIdResolver::resolve(&custom_envelope(
            r#"{"customerServicePlugin":1,"src":"7"}"#,
        ));
        assert_eq!(route.business_id, "customerServicePlugin7");
    }

    #[test]
    fn customer_service_without_src_yields_empty_route() {
        let route =
            BusinessIdResolver::resolve(&custom_envelope(r#"{"customerServicePlugin":1}"#));
        assert!(route.is_empty());
    }

    #[test]
    fn chatbot_src_22_maps_to_ignore_marker() {
        let route = BusinessIdResolver::resolve(&custom_envelope(
            r#"{"chatbotPlugin":true,"src":22}"#,
        ));
        assert_eq!(route.business_id, "IgnoreMessage");
        assert!(route.drops_silently());
    }

    #[test]
    fn chatbot_other_src_keeps_plugin_id() {
        let route = BusinessIdResolver::resolve(&custom_envelope(
            r#"{"chatbotPlugin":true,"src":3}"#,
        ));
        assert_eq!(route.business_id, "chatbotPlugin");
        assert!(!route.drops_silently());
    }

    #[test]
    fn malformed_json_degrades_to_empty_route() {
        let route = BusinessIdResolver::resolve(&custom_envelope("not json"));
        assert_eq!(route, BusinessRoute::empty());
    }

    #[test]
    fn signaling_route_requires_both_exclusion_flags() {
        let mut envelope = custom_envelope("{}");
        envelope.signaling = Some(SignalingInfo {
            group_id: None,
            data: r#"{"businessID":"av_call"}"#.to_string(),
        });
        envelope.excluded_from_last_message = true;
        envelope.excluded_from_unread_count = false;
        let route = BusinessIdResolver::resolve(&envelope);
        assert_eq!(route.business_id, "av_call");
        assert!(!route.exclude_from_history);

        envelope.excluded_from_unread_count = true;
        let route = BusinessIdResolver::resolve(&envelope);
        assert!(route.exclude_from_history);
    }

    #[test]
    fn non_custom_element_has_no_route() {
        let envelope = MessageEnvelope::default();
        assert_eq!(BusinessIdResolver::resolve(&envelope), BusinessRoute::empty());
    }
}

use serde_json::Value;

/// Inbound event as delivered by the host, kept in its raw form.
///
/// Payloads follow the OneBot shape: a flat object with `post_type` and a
/// type-specific discriminator (`notice_type`, `message_type`, ...).
#[derive(Debug, Clone)]
pub struct Event {
    pub platform: String,
    pub raw: Value,
}

impl Event {
    pub fn new(raw: Value) -> Self {
        Self {
            platform: "unknown".to_string(),
            raw,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn post_type(&self) -> Option<&str> {
        self.str_field("post_type")
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn is_message(&self) -> bool {
        self.post_type() == Some("message")
    }

    /// Group id as a string, whether the payload carries it as a number or a string.
    pub fn group_id(&self) -> Option<String> {
        self.raw.get("group_id").and_then(id_to_string)
    }

    /// Typed view of a "member joined group" notice, if this is one.
    pub fn join_notice(&self) -> Option<JoinNotice> {
        JoinNotice::from_event(self)
    }
}

/// A member joined a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinNotice {
    pub group_id: String,
    pub user_id: u64,
}

impl JoinNotice {
    pub const NOTICE_TYPE: &'static str = "group_increase";

    /// Any mismatch, including malformed ids, yields `None`.
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.post_type() != Some("notice") || event.str_field("notice_type") != Some(Self::NOTICE_TYPE) {
            return None;
        }

        let group_id = event.group_id().filter(|id| !id.is_empty())?;
        let user_id = event.raw.get("user_id").and_then(id_to_u64).filter(|id| *id != 0)?;

        Some(Self { group_id, user_id })
    }
}

pub(crate) fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn id_to_u64(value: &Value) -> Option<u64> {
    match value {
        // Whole floats like 12345.0 count as ids
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notice(raw: Value) -> Option<JoinNotice> {
        Event::new(raw).join_notice()
    }

    #[test]
    fn test_join_notice_matches() {
        let n = notice(json!({
            "post_type": "notice",
            "notice_type": "group_increase",
            "group_id": 100,
            "user_id": 12345,
        }));
        assert_eq!(n, Some(JoinNotice { group_id: "100".to_string(), user_id: 12345 }));
    }

    #[test]
    fn test_join_notice_accepts_string_ids() {
        let n = notice(json!({
            "post_type": "notice",
            "notice_type": "group_increase",
            "group_id": "abc",
            "user_id": "42",
        }));
        assert_eq!(n, Some(JoinNotice { group_id: "abc".to_string(), user_id: 42 }));
    }

    #[test]
    fn test_join_notice_ignores_other_shapes() {
        assert!(notice(json!({"post_type": "message", "group_id": 1, "user_id": 2})).is_none());
        assert!(notice(json!({"post_type": "notice", "notice_type": "group_decrease", "group_id": 1, "user_id": 2})).is_none());
        assert!(notice(json!("not an object")).is_none());
        assert!(notice(Value::Null).is_none());
    }

    #[test]
    fn test_join_notice_ignores_malformed_ids() {
        let base = |group: Value, user: Value| json!({
            "post_type": "notice",
            "notice_type": "group_increase",
            "group_id": group,
            "user_id": user,
        });

        assert!(notice(base(json!(""), json!(1))).is_none());
        assert!(notice(base(Value::Null, json!(1))).is_none());
        assert!(notice(base(json!(100), json!(0))).is_none());
        assert!(notice(base(json!(100), json!("nope"))).is_none());
        assert!(notice(base(json!(100), json!(-5))).is_none());
        assert!(notice(json!({"post_type": "notice", "notice_type": "group_increase"})).is_none());
    }

    #[test]
    fn test_join_notice_accepts_whole_float_user_id() {
        let base = |user: Value| json!({
            "post_type": "notice",
            "notice_type": "group_increase",
            "group_id": 100,
            "user_id": user,
        });

        assert_eq!(notice(base(json!(12345.0))).map(|n| n.user_id), Some(12345));
        assert!(notice(base(json!(12.5))).is_none());
        assert!(notice(base(json!(-5.0))).is_none());
        assert!(notice(base(json!(0.0))).is_none());
    }
}

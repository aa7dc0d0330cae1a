//! Tolerant NapCat response payload handling.
//!
//! Different NapCat builds signal success with different fields, so each
//! predicate is an ordered OR over the accepted conventions. This is a
//! compatibility shim, kept explicit rather than spread through the client.

use napsign_core::GroupId;
use serde_json::Value;

/// A `/get_group_list` payload is ok when `status == "ok"` or `retcode == 0`.
pub fn list_ok(payload: &Value) -> bool {
    payload.get("status").and_then(Value::as_str) == Some("ok")
        || payload.get("retcode").and_then(Value::as_i64) == Some(0)
}

/// A `/set_group_sign` payload is ok when `status == "success"`, `code == 0`,
/// or `retcode == 0`.
pub fn sign_ok(payload: &Value) -> bool {
    payload.get("status").and_then(Value::as_str) == Some("success")
        || payload.get("code").and_then(Value::as_i64) == Some(0)
        || payload.get("retcode").and_then(Value::as_i64) == Some(0)
}

/// Pull every `group_id` out of the `data` array, coercing numeric ids to
/// strings. Entries without a usable id are skipped silently.
pub fn extract_group_ids(payload: &Value) -> Vec<GroupId> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(group_id_of).collect())
        .unwrap_or_default()
}

fn group_id_of(entry: &Value) -> Option<GroupId> {
    match entry.get("group_id")? {
        Value::String(s) if !s.is_empty() => Some(GroupId::from(s.as_str())),
        Value::Number(n) if n.as_i64() != Some(0) => Some(GroupId(n.to_string())),
        _ => None,
    }
}

/// The service's `message` field, or the given fallback when absent.
pub fn failure_message(payload: &Value, fallback: &str) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_ok_accepts_either_convention() {
        assert!(list_ok(&json!({"status": "ok"})));
        assert!(list_ok(&json!({"retcode": 0})));
        assert!(list_ok(&json!({"status": "failed", "retcode": 0})));
        assert!(!list_ok(&json!({"status": "failed", "retcode": 1})));
        assert!(!list_ok(&json!({})));
    }

    #[test]
    fn sign_ok_accepts_all_three_conventions() {
        assert!(sign_ok(&json!({"status": "success"})));
        assert!(sign_ok(&json!({"code": 0})));
        assert!(sign_ok(&json!({"retcode": 0})));
        assert!(!sign_ok(&json!({"status": "ok"})));
        assert!(!sign_ok(&json!({"code": 1, "retcode": -1})));
    }

    #[test]
    fn extracts_ids_and_skips_entries_without_one() {
        let payload = json!({
            "status": "ok",
            "data": [
                {"group_id": 123456, "group_name": "alpha"},
                {"group_name": "no id here"},
                {"group_id": "789"},
                {"group_id": 0},
            ]
        });
        let ids = extract_group_ids(&payload);
        assert_eq!(ids, vec![GroupId::from("123456"), GroupId::from("789")]);
    }

    #[test]
    fn missing_data_array_yields_no_ids() {
        assert!(extract_group_ids(&json!({"status": "ok"})).is_empty());
        assert!(extract_group_ids(&json!({"status": "ok", "data": null})).is_empty());
    }

    #[test]
    fn failure_message_falls_back() {
        assert_eq!(
            failure_message(&json!({"message": "rate limited"}), "no reason"),
            "rate limited"
        );
        assert_eq!(failure_message(&json!({"message": ""}), "no reason"), "no reason");
        assert_eq!(failure_message(&json!({}), "no reason"), "no reason");
    }
}

//! Telegram login-widget payload validation.
//!
//! The widget signs its payload with `HMAC-SHA256(check_string, SHA256(bot_token))`
//! where `check_string` is every field except `hash`, sorted by key and
//! joined as `key=value` lines. A payload that fails this check was not
//! produced by Telegram for this bot.

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Validates a login-widget payload against the bot token.
///
/// Returns `false` for payloads without a `hash` field or with a hash
/// that does not match the recomputed signature.
#[must_use]
pub fn verify_login_payload(data: &Map<String, Value>, bot_token: &str) -> bool {
    let Some(expected_hash) = data.get("hash").and_then(Value::as_str) else {
        return false;
    };

    let mut fields: Vec<(String, String)> = data
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .map(|(key, value)| (key.clone(), value_as_field_string(value)))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let check_string = fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n");

    let secret = Sha256::digest(bot_token.as_bytes());
    let Ok(mut mac) = HmacSha256::new_from_slice(&secret) else {
        return false;
    };
    mac.update(check_string.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    signature == expected_hash
}

/// Extracts the Telegram user ID from a login-widget payload.
#[must_use]
pub fn login_user_id(data: &Map<String, Value>) -> Option<i64> {
    match data.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Renders a payload value the way the widget's check string does:
/// strings bare, everything else in JSON form.
fn value_as_field_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const BOT_TOKEN: &str = "123456:test-bot-token";

    fn sign(data: &Map<String, Value>) -> String {
        let mut fields: Vec<(String, String)> = data
            .iter()
            .filter(|(key, _)| key.as_str() != "hash")
            .map(|(key, value)| (key.clone(), value_as_field_string(value)))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let check_string = fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n");

        let secret = Sha256::digest(BOT_TOKEN.as_bytes());
        let Ok(mut mac) = HmacSha256::new_from_slice(&secret) else {
            panic!("hmac accepts any key length");
        };
        mac.update(check_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn payload() -> Map<String, Value> {
        let Value::Object(mut map) = serde_json::json!({
            "id": 42,
            "first_name": "Alice",
            "username": "alice",
            "auth_date": 1_700_000_000_i64,
        }) else {
            panic!("object literal");
        };
        let hash = sign(&map);
        map.insert("hash".to_string(), Value::String(hash));
        map
    }

    #[test]
    fn valid_payload_verifies() {
        let data = payload();
        assert!(verify_login_payload(&data, BOT_TOKEN));
    }

    #[test]
    fn tampered_payload_fails() {
        let mut data = payload();
        data.insert("username".to_string(), Value::String("mallory".to_string()));
        assert!(!verify_login_payload(&data, BOT_TOKEN));
    }

    #[test]
    fn missing_hash_fails() {
        let mut data = payload();
        data.remove("hash");
        assert!(!verify_login_payload(&data, BOT_TOKEN));
    }

    #[test]
    fn wrong_bot_token_fails() {
        let data = payload();
        assert!(!verify_login_payload(&data, "999:other-token"));
    }

    #[test]
    fn user_id_accepts_number_or_string() {
        let data = payload();
        assert_eq!(login_user_id(&data), Some(42));

        let Value::Object(string_id) = serde_json::json!({ "id": "77" }) else {
            panic!("object literal");
        };
        assert_eq!(login_user_id(&string_id), Some(77));
    }
}

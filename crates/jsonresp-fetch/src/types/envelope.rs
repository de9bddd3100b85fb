/*
[INPUT]:  Decoded JSON response bodies
[OUTPUT]: Typed `{ err, msg?, dat? }` response envelope
[POS]:    Data layer - response envelope definition
[UPDATE]: When the server envelope schema changes
*/

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{FetchError, Result};

/// Response envelope returned by the remote API
///
/// `err == 0` means success; any other value is an application error
/// described by `msg`. `dat` carries the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonResp<T = Value> {
    pub err: i128,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dat: Option<T>,
}

impl<T> JsonResp<T> {
    pub fn is_ok(&self) -> bool {
        self.err == 0
    }
}

impl JsonResp<Value> {
    /// Build an envelope from a value already accepted by
    /// [`validate_structure`](crate::http::validate_structure).
    ///
    /// A non-string `msg` is kept as text when it is truthy (non-zero
    /// numbers, `true`, arrays, objects) and treated as absent otherwise.
    pub fn from_validated(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(FetchError::Structural(
                "response envelope is not an object".to_string(),
            ));
        };

        let err = map
            .get("err")
            .and_then(integer_code)
            .ok_or_else(|| FetchError::Structural("`err` is not an integer".to_string()))?;

        let msg = map.remove("msg").and_then(message_text);

        Ok(Self {
            err,
            msg,
            dat: map.remove("dat"),
        })
    }

    /// Decode `dat` into the caller's payload type
    pub fn decode_dat<T: DeserializeOwned>(self) -> Result<JsonResp<T>> {
        let dat = match self.dat {
            Some(dat) => Some(serde_json::from_value(dat)?),
            None => None,
        };

        Ok(JsonResp {
            err: self.err,
            msg: self.msg,
            dat,
        })
    }
}

/// Read an integer `err`, covering the full `i64` and `u64` ranges
pub(crate) fn integer_code(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn message_text(msg: Value) -> Option<String> {
    match msg {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) | Value::Null => None,
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_from_validated() {
        let resp = JsonResp::from_validated(json!({"err": 0, "msg": "ok", "dat": {"id": 1}}))
            .unwrap();

        assert!(resp.is_ok());
        assert_eq!(resp.msg.as_deref(), Some("ok"));
        assert_eq!(resp.dat, Some(json!({"id": 1})));
    }

    #[test]
    fn test_from_validated_stringifies_truthy_msg() {
        let resp = JsonResp::from_validated(json!({"err": 3, "msg": 42})).unwrap();
        assert_eq!(resp.err, 3);
        assert_eq!(resp.msg.as_deref(), Some("42"));
        assert_eq!(resp.dat, None);

        let resp = JsonResp::from_validated(json!({"err": 3, "msg": true})).unwrap();
        assert_eq!(resp.msg.as_deref(), Some("true"));

        let resp = JsonResp::from_validated(json!({"err": 3, "msg": {"field": "id"}})).unwrap();
        assert_eq!(resp.msg.as_deref(), Some(r#"{"field":"id"}"#));
    }

    #[test]
    fn test_from_validated_drops_falsy_msg() {
        for msg in [json!(0), json!(0.0), json!(false), Value::Null] {
            let resp = JsonResp::from_validated(json!({"err": 3, "msg": msg})).unwrap();
            assert_eq!(resp.msg, None);
        }
    }

    #[test]
    fn test_from_validated_keeps_codes_beyond_i64() {
        let value: Value = serde_json::from_str(r#"{"err": 9223372036854775808}"#).unwrap();
        let resp = JsonResp::from_validated(value).unwrap();
        assert_eq!(resp.err, i128::from(i64::MAX) + 1);

        let resp = JsonResp::from_validated(json!({"err": u64::MAX})).unwrap();
        assert_eq!(resp.err, i128::from(u64::MAX));

        let resp = JsonResp::from_validated(json!({"err": i64::MIN})).unwrap();
        assert_eq!(resp.err, i128::from(i64::MIN));
    }

    #[test]
    fn test_from_validated_rejects_non_object() {
        let err = JsonResp::from_validated(json!([1, 2, 3])).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_decode_dat() {
        let resp = JsonResp::from_validated(json!({"err": 0, "dat": {"id": 7}}))
            .unwrap()
            .decode_dat::<Item>()
            .unwrap();

        assert_eq!(resp.dat, Some(Item { id: 7 }));
    }

    #[test]
    fn test_decode_dat_type_mismatch() {
        let err = JsonResp::from_validated(json!({"err": 0, "dat": "oops"}))
            .unwrap()
            .decode_dat::<Item>()
            .unwrap_err();

        assert!(matches!(err, FetchError::Serialization(_)));
    }

    #[test]
    fn test_envelope_serialization_skips_absent_fields() {
        let resp: JsonResp = JsonResp {
            err: 0,
            msg: None,
            dat: Some(json!({"id": 1})),
        };

        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"err": 0, "dat": {"id": 1}})
        );
    }
}

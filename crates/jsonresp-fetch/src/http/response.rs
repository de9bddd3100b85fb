/*
[INPUT]:  Raw JSON values resolved by the transport
[OUTPUT]: Structurally validated envelopes or contract/application errors
[POS]:    HTTP layer - response envelope validation
[UPDATE]: When envelope validation rules or error surfacing change
*/

use serde_json::Value;
use tracing::{debug, warn};

use crate::http::{FetchError, Result};
use crate::types::JsonResp;
use crate::types::envelope::integer_code;

/// Check that `value` has the `{ err: integer, ... }` envelope shape.
///
/// Returns the value unchanged on success.
pub fn validate_structure(value: Value) -> Result<Value> {
    let reason = match &value {
        Value::Null => "response envelope is null",
        Value::Object(map) => match map.get("err") {
            Some(err) if integer_code(err).is_some() => return Ok(value),
            Some(_) => "`err` is not an integer",
            None => "`err` is missing",
        },
        _ => "response envelope is not an object",
    };

    debug!(reason, "rejecting response envelope");
    Err(FetchError::Structural(reason.to_string()))
}

/// Fail with [`FetchError::Application`] if the envelope reports `err != 0`.
pub fn raise_if_application_error<T>(envelope: &JsonResp<T>) -> Result<()> {
    if envelope.is_ok() {
        return Ok(());
    }

    let err = FetchError::application(envelope.err, envelope.msg.as_deref());
    warn!(code = %envelope.err, error = %err, "server reported application error");
    Err(err)
}

use serde_json::{Map, Value};

use crate::utils::AppError;

/// Schemaless user record. Only `id` is required; every other field is stored verbatim.
pub type UserDocument = Map<String, Value>;

/// Application-level identifier field (distinct from the store's `_id`).
pub const USER_ID_FIELD: &str = "id";

/// Store-native primary key, never exposed to callers.
pub const STORE_ID_FIELD: &str = "_id";

/// Parses a request body into a `UserDocument`.
pub fn parse_user_document(body: &[u8]) -> Result<UserDocument, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidRequest(format!("Malformed JSON body: {}", e)))?;

    if let Some(path) = find_unstorable_number(&value, String::new()) {
        return Err(AppError::InvalidRequest(format!(
            "Field '{}' is an integer above {}",
            path,
            i64::MAX
        )));
    }

    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(AppError::InvalidRequest(
            "User document must be a JSON object".to_string(),
        )),
    }
}

/// Document stores hold signed 64-bit integers at most; returns the path of the first
/// number that does not fit.
fn find_unstorable_number(value: &Value, path: String) -> Option<String> {
    match value {
        Value::Number(n) if n.is_u64() && !n.is_i64() => Some(path),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_unstorable_number(item, format!("{}[{}]", path, i))),
        Value::Object(fields) => fields.iter().find_map(|(key, field)| {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            find_unstorable_number(field, child)
        }),
        _ => None,
    }
}

/// Returns the `id` of a user document.
pub fn user_id(doc: &UserDocument) -> Result<&str, AppError> {
    match doc.get(USER_ID_FIELD) {
        Some(Value::String(id)) => Ok(id),
        Some(_) => Err(AppError::InvalidRequest(
            "Field 'id' must be a string".to_string(),
        )),
        None => Err(AppError::InvalidRequest(
            "Field 'id' is required".to_string(),
        )),
    }
}

//! JSON mode: `{"value": ..., "args": ...}` envelopes.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ExtractConfig;
use crate::extract::args::{decode_args, Args};
use crate::extract::error::{json_type, ExtractError};

/// Extractor yielding the envelope's value and decoded args.
///
/// ```rust,ignore
/// async fn handler(ValueArgs(value, args): ValueArgs) -> Json<Value> {
///     Json(json!({"value": value, "n": args.get_as::<u32>("n")}))
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueArgs<T = Value>(pub T, pub Args);

impl<T, S> FromRequest<S> for ValueArgs<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let config = ExtractConfig::from_extensions(req.extensions());
        let (value, args) = extract_value_args(req, &config).await?;
        Ok(ValueArgs(value, args))
    }
}

/// Read the whole body and split it into `(value, args)`.
pub async fn extract_value_args<T>(req: Request, config: &ExtractConfig) -> Result<(T, Args), ExtractError>
where
    T: DeserializeOwned,
{
    let body = Bytes::from_request(req, &()).await?;
    value_args_from_slice(&body, config)
}

/// Split an already buffered JSON body into `(value, args)`.
///
/// A missing value member yields `null`; missing args yield an empty mapping.
pub fn value_args_from_slice<T>(body: &[u8], config: &ExtractConfig) -> Result<(T, Args), ExtractError>
where
    T: DeserializeOwned,
{
    let mut envelope = match serde_json::from_slice(body).map_err(ExtractError::InvalidBody)? {
        Value::Object(map) => map,
        other => return Err(ExtractError::BodyNotObject(json_type(&other))),
    };

    let args = decode_args(envelope.remove(&config.args_field))?;
    let value = envelope.remove(&config.value_field).unwrap_or(Value::Null);
    let value = serde_json::from_value(value).map_err(ExtractError::InvalidValue)?;

    Ok((value, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn split(body: &str) -> Result<(Value, Args), ExtractError> {
        value_args_from_slice(body.as_bytes(), &ExtractConfig::default())
    }

    #[test]
    fn test_value_and_args() {
        let (value, args) = split(r#"{"value": {"x": 1}, "args": {"n": "3"}}"#).unwrap();
        assert_eq!(value, json!({"x": 1}));
        assert_eq!(args.get_str("n"), Some("3"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_args_as_encoded_string() {
        let (value, args) = split(r#"{"value": [1, 2], "args": "{\"n\": \"3\"}"}"#).unwrap();
        assert_eq!(value, json!([1, 2]));
        assert_eq!(args.get_as::<u8>("n"), Some(3));
    }

    #[test]
    fn test_missing_members() {
        let (value, args) = split(r#"{"value": "hello"}"#).unwrap();
        assert_eq!(value, json!("hello"));
        assert!(args.is_empty());

        let (value, _) = split("{}").unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_invalid_bodies() {
        assert!(matches!(split("{\"value\": "), Err(ExtractError::InvalidBody(_))));
        assert!(matches!(split(""), Err(ExtractError::InvalidBody(_))));
        assert!(matches!(split("[1]"), Err(ExtractError::BodyNotObject("array"))));
        assert!(matches!(
            split(r#"{"value": 1, "args": "oops"}"#),
            Err(ExtractError::InvalidArgs(_))
        ));
    }

    #[test]
    fn test_typed_value() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Point {
            x: i32,
        }

        let (point, _): (Point, Args) =
            value_args_from_slice(br#"{"value": {"x": 1}}"#, &ExtractConfig::default()).unwrap();
        assert_eq!(point, Point { x: 1 });

        let err = value_args_from_slice::<Point>(br#"{"value": {"y": 1}}"#, &ExtractConfig::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidValue(_)));
    }

    #[test]
    fn test_custom_field_names() {
        let config = ExtractConfig {
            value_field: "data".into(),
            args_field: "config".into(),
            ..ExtractConfig::default()
        };
        let (value, args): (Value, Args) =
            value_args_from_slice(br#"{"data": 5, "config": {"k": "v"}}"#, &config).unwrap();
        assert_eq!(value, json!(5));
        assert_eq!(args.get_str("k"), Some("v"));
    }

    #[test]
    fn test_identical_requests_give_identical_results() {
        let body = r#"{"value": {"x": 1}, "args": {"n": "3"}}"#;
        assert_eq!(split(body).unwrap(), split(body).unwrap());
    }
}

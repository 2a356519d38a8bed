//! Envelope - the wire wrapper around every native response.
//!
//! The live shape is adjacently tagged:
//!
//! ```text
//! {"tag": "Ok",  "content": <payload>}
//! {"tag": "Err", "content": {"tag": "UiError",    "content": "<Name>"}}
//! {"tag": "Err", "content": {"tag": "Unexpected", "content": "<message>"}}
//! ```
//!
//! Older cores keyed responses by presence instead (`{"Ok": X}`,
//! `{"Err": "Name"}`, `{"Err": {"UnexpectedError": "msg"}}`). That shape is
//! only read when [`WireCompat::AcceptLegacy`] is selected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ContractViolation;

/// Which wire shapes a reader accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireCompat {
    /// Only `{tag, content}`.
    #[default]
    Strict,
    /// `{tag, content}`, falling back to the legacy keyed shape when `tag`
    /// is absent and exactly one of `Ok` / `Err` is present.
    AcceptLegacy,
}

/// The error half of an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrKind {
    /// An expected-error name, not yet checked against any table.
    UiError(String),
    /// A diagnostic from the core.
    Unexpected(String),
}

/// A structurally valid envelope whose `Ok` payload is still untyped.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Success, with the raw `content`.
    Ok(Value),
    /// Failure.
    Err(ErrKind),
}

impl Envelope {
    /// Parse a raw response.
    ///
    /// Never panics; every malformed input becomes a [`ContractViolation`].
    pub fn parse(raw: &str, compat: WireCompat) -> Result<Self, ContractViolation> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ContractViolation::InvalidJson {
                reason: e.to_string(),
                raw: raw.to_string(),
            })?;

        let Value::Object(obj) = value else {
            return Err(ContractViolation::NotAnObject(raw.to_string()));
        };

        match obj.get("tag") {
            Some(Value::String(tag)) => {
                let content = obj
                    .get("content")
                    .ok_or_else(|| ContractViolation::MissingContent(raw.to_string()))?;
                match tag.as_str() {
                    "Ok" => Ok(Envelope::Ok(content.clone())),
                    "Err" => parse_err_kind(content).map(Envelope::Err),
                    other => Err(ContractViolation::UnknownTag(other.to_string())),
                }
            }
            Some(_) => Err(ContractViolation::MissingTag(raw.to_string())),
            None if compat == WireCompat::AcceptLegacy && is_legacy(&obj) => {
                parse_legacy(obj, raw)
            }
            None => Err(ContractViolation::MissingTag(raw.to_string())),
        }
    }
}

fn parse_err_kind(content: &Value) -> Result<ErrKind, ContractViolation> {
    let tag = content
        .get("tag")
        .and_then(Value::as_str)
        .ok_or_else(|| ContractViolation::MissingErrTag(content.to_string()))?;
    let inner = content
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| ContractViolation::MissingErrContent(content.to_string()))?;

    match tag {
        "UiError" => Ok(ErrKind::UiError(inner.to_string())),
        "Unexpected" => Ok(ErrKind::Unexpected(inner.to_string())),
        other => Err(ContractViolation::UnknownErrTag(other.to_string())),
    }
}

fn is_legacy(obj: &Map<String, Value>) -> bool {
    obj.contains_key("Ok") != obj.contains_key("Err")
}

fn parse_legacy(mut obj: Map<String, Value>, raw: &str) -> Result<Envelope, ContractViolation> {
    if let Some(ok) = obj.remove("Ok") {
        return Ok(Envelope::Ok(ok));
    }

    match obj.remove("Err") {
        Some(Value::String(name)) => Ok(Envelope::Err(ErrKind::UiError(name))),
        Some(Value::Object(err)) => match err.get("UnexpectedError") {
            Some(Value::String(msg)) if err.len() == 1 => {
                Ok(Envelope::Err(ErrKind::Unexpected(msg.clone())))
            }
            _ => Err(ContractViolation::BadLegacyEnvelope(raw.to_string())),
        },
        _ => Err(ContractViolation::BadLegacyEnvelope(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strict(raw: &str) -> Result<Envelope, ContractViolation> {
        Envelope::parse(raw, WireCompat::Strict)
    }

    fn legacy(raw: &str) -> Result<Envelope, ContractViolation> {
        Envelope::parse(raw, WireCompat::AcceptLegacy)
    }

    #[test]
    fn ok_with_null_content() {
        assert_eq!(
            strict(r#"{"tag":"Ok","content":null}"#).unwrap(),
            Envelope::Ok(Value::Null)
        );
    }

    #[test]
    fn ok_keeps_content_untouched() {
        let env = strict(r#"{"tag":"Ok","content":{"a":[1,2]}}"#).unwrap();
        assert_eq!(env, Envelope::Ok(json!({"a": [1, 2]})));
    }

    #[test]
    fn ui_error_name_is_extracted() {
        let env = strict(r#"{"tag":"Err","content":{"tag":"UiError","content":"UsernameTaken"}}"#)
            .unwrap();
        assert_eq!(
            env,
            Envelope::Err(ErrKind::UiError("UsernameTaken".to_string()))
        );
    }

    #[test]
    fn unexpected_message_is_verbatim() {
        let env =
            strict(r#"{"tag":"Err","content":{"tag":"Unexpected","content":"  boom\n"}}"#).unwrap();
        assert_eq!(env, Envelope::Err(ErrKind::Unexpected("  boom\n".to_string())));
    }

    #[test]
    fn empty_object_has_no_tag() {
        assert!(matches!(strict("{}"), Err(ContractViolation::MissingTag(_))));
    }

    #[test]
    fn non_json_and_non_object() {
        assert!(matches!(
            strict("not json"),
            Err(ContractViolation::InvalidJson { .. })
        ));
        assert!(matches!(
            strict("[1,2]"),
            Err(ContractViolation::NotAnObject(_))
        ));
        assert!(matches!(strict(""), Err(ContractViolation::InvalidJson { .. })));
    }

    #[test]
    fn tag_must_be_a_string() {
        assert!(matches!(
            strict(r#"{"tag":1,"content":null}"#),
            Err(ContractViolation::MissingTag(_))
        ));
    }

    #[test]
    fn missing_content() {
        assert!(matches!(
            strict(r#"{"tag":"Ok"}"#),
            Err(ContractViolation::MissingContent(_))
        ));
    }

    #[test]
    fn unknown_top_level_tag() {
        assert_eq!(
            strict(r#"{"tag":"Maybe","content":null}"#),
            Err(ContractViolation::UnknownTag("Maybe".to_string()))
        );
    }

    #[test]
    fn malformed_err_content() {
        assert!(matches!(
            strict(r#"{"tag":"Err","content":"UsernameTaken"}"#),
            Err(ContractViolation::MissingErrTag(_))
        ));
        assert!(matches!(
            strict(r#"{"tag":"Err","content":{"tag":"UiError"}}"#),
            Err(ContractViolation::MissingErrContent(_))
        ));
        assert!(matches!(
            strict(r#"{"tag":"Err","content":{"tag":"UiError","content":7}}"#),
            Err(ContractViolation::MissingErrContent(_))
        ));
        assert_eq!(
            strict(r#"{"tag":"Err","content":{"tag":"Panic","content":"x"}}"#),
            Err(ContractViolation::UnknownErrTag("Panic".to_string()))
        );
    }

    #[test]
    fn strict_rejects_legacy_shape() {
        assert!(matches!(
            strict(r#"{"Err":"UsernameTaken"}"#),
            Err(ContractViolation::MissingTag(_))
        ));
    }

    #[test]
    fn legacy_shapes_are_read_when_enabled() {
        assert_eq!(legacy(r#"{"Ok":true}"#).unwrap(), Envelope::Ok(json!(true)));
        assert_eq!(
            legacy(r#"{"Err":"NoAccount"}"#).unwrap(),
            Envelope::Err(ErrKind::UiError("NoAccount".to_string()))
        );
        assert_eq!(
            legacy(r#"{"Err":{"UnexpectedError":"db locked"}}"#).unwrap(),
            Envelope::Err(ErrKind::Unexpected("db locked".to_string()))
        );
    }

    #[test]
    fn legacy_requires_exactly_one_branch() {
        assert!(matches!(
            legacy(r#"{"Ok":1,"Err":"NoAccount"}"#),
            Err(ContractViolation::MissingTag(_))
        ));
        assert!(matches!(legacy("{}"), Err(ContractViolation::MissingTag(_))));
    }

    #[test]
    fn malformed_legacy_err() {
        assert!(matches!(
            legacy(r#"{"Err":{"Something":"else"}}"#),
            Err(ContractViolation::BadLegacyEnvelope(_))
        ));
        assert!(matches!(
            legacy(r#"{"Err":5}"#),
            Err(ContractViolation::BadLegacyEnvelope(_))
        ));
    }

    #[test]
    fn tagged_shape_wins_under_legacy_compat() {
        let env = legacy(r#"{"tag":"Ok","content":1,"Err":"NoAccount"}"#).unwrap();
        assert_eq!(env, Envelope::Ok(json!(1)));
    }

    #[test]
    fn wire_compat_serde_names() {
        let compat: WireCompat = serde_json::from_str(r#""accept-legacy""#).unwrap();
        assert_eq!(compat, WireCompat::AcceptLegacy);
        assert_eq!(WireCompat::default(), WireCompat::Strict);
    }
}

#![deny(missing_docs)]

//! # Document Root
//!
//! The root object of a message-driven API description, plus the crate's
//! parsing entry points. Documents arrive as YAML or JSON text (YAML being a
//! superset, one parser covers both) or as an already-parsed value tree.

use crate::channel::Channel;
use crate::components::Components;
use crate::error::{DecodeError, DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::info::Info;
use crate::operation::Operation;
use crate::reference::{decode_ref_map, encode_ref_map, RefOr};
use crate::schema::{DecodeOptions, Depth};
use crate::server::Server;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::OnceLock;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^3\.0\.\d+$").unwrap_or_else(|_| unreachable!()))
}

/// The root object of a message-driven API description document.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncApi {
    /// The description-format version this document targets, `3.0.x`.
    pub asyncapi: String,
    /// A unique identifier for the application, typically a URN.
    pub id: Option<String>,
    /// Metadata about the API.
    pub info: Info,
    /// Servers the application connects to, by name.
    pub servers: Option<IndexMap<String, RefOr<Server>>>,
    /// Default content type for message payloads.
    pub default_content_type: Option<String>,
    /// The channels the application communicates over, by name.
    pub channels: Option<IndexMap<String, RefOr<Channel>>>,
    /// The operations the application performs, by name.
    pub operations: Option<IndexMap<String, RefOr<Operation>>>,
    /// Reusable objects for the rest of the document.
    pub components: Option<Components>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl AsyncApi {
    /// Decodes a document from an already-parsed value tree with default
    /// options.
    pub fn from_value(value: &Value) -> DecodeResult<Self> {
        Self::from_value_with(value, &DecodeOptions::default())
    }

    /// Decodes a document from an already-parsed value tree.
    pub fn from_value_with(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        let root = Path::root();
        let depth = Depth::new(options.max_depth);
        let mut fields = ObjectDecoder::new(value, &root)?;
        let asyncapi = {
            let raw = fields.req_str("asyncapi", None)?;
            if !version_pattern().is_match(&raw) {
                return Err(DecodeError::format(&fields.at("asyncapi"), r"^3\.0\.\d+$"));
            }
            raw
        };
        let id = fields.opt_str("id", None)?;
        let info = {
            let value = fields.required("info", None)?;
            Info::decode(value, &fields.at("info"))?
        };
        let servers = match fields.optional("servers", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("servers"), Server::decode)?),
            None => None,
        };
        let default_content_type =
            fields.opt_str("default_content_type", Some("defaultContentType"))?;
        let channels = match fields.optional("channels", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("channels"), |v, p| {
                Channel::decode(v, p, depth)
            })?),
            None => None,
        };
        let operations = match fields.optional("operations", None)? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("operations"),
                Operation::decode,
            )?),
            None => None,
        };
        let components = match fields.optional("components", None)? {
            Some(value) => Some(Components::decode(value, &fields.at("components"), depth)?),
            None => None,
        };
        Ok(Self {
            asyncapi,
            id,
            info,
            servers,
            default_content_type,
            channels,
            operations,
            components,
            extensions: fields.extensions(),
        })
    }

    /// Parses a document from YAML or JSON text with default options.
    pub fn parse(input: &str) -> DecodeResult<Self> {
        Self::parse_with(input, &DecodeOptions::default())
    }

    /// Parses a document from YAML or JSON text.
    pub fn parse_with(input: &str, options: &DecodeOptions) -> DecodeResult<Self> {
        let value: Value =
            serde_yaml::from_str(input).map_err(|err| DecodeError::Syntax(err.to_string()))?;
        Self::from_value_with(&value, options)
    }

    /// Re-encodes the document as a value tree under the given naming.
    ///
    /// `to_value(Wire)` after a successful decode reproduces the input key
    /// set exactly, modulo key order and the canonical-vs-alias spelling of
    /// duplicated aliased fields.
    pub fn to_value(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("asyncapi", None, &self.asyncapi);
        out.str("id", None, &self.id);
        out.set("info", None, self.info.encode(naming));
        if let Some(servers) = &self.servers {
            out.set(
                "servers",
                None,
                encode_ref_map(servers, naming, |s| s.encode(naming)),
            );
        }
        out.str(
            "default_content_type",
            Some("defaultContentType"),
            &self.default_content_type,
        );
        if let Some(channels) = &self.channels {
            out.set(
                "channels",
                None,
                encode_ref_map(channels, naming, |c| c.encode(naming)),
            );
        }
        if let Some(operations) = &self.operations {
            out.set(
                "operations",
                None,
                encode_ref_map(operations, naming, |o| o.encode(naming)),
            );
        }
        if let Some(components) = &self.components {
            out.set("components", None, components.encode(naming));
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

impl Serialize for AsyncApi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value(FieldNaming::Wire).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_MAX_DEPTH;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_minimal_document() {
        let doc = json!({
            "asyncapi": "3.0.0",
            "info": {"title": "Account Service", "version": "1.0.0"},
        });
        let api = AsyncApi::from_value(&doc).unwrap();
        assert_eq!(api.asyncapi, "3.0.0");
        assert_eq!(api.info.title, "Account Service");
        assert_eq!(api.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_version_must_match_major_minor() {
        for bad in ["2.6.0", "3.1.0", "3.0", "three"] {
            let doc = json!({
                "asyncapi": bad,
                "info": {"title": "t", "version": "1.0.0"},
            });
            let err = AsyncApi::from_value(&doc).unwrap_err();
            assert_eq!(
                err,
                DecodeError::FormatViolation {
                    path: "asyncapi".into(),
                    pattern: r"^3\.0\.\d+$".into(),
                }
            );
        }
        for good in ["3.0.0", "3.0.17"] {
            let doc = json!({
                "asyncapi": good,
                "info": {"title": "t", "version": "1.0.0"},
            });
            assert!(AsyncApi::from_value(&doc).is_ok());
        }
    }

    #[test]
    fn test_missing_info_version() {
        let doc = json!({"asyncapi": "3.0.0", "info": {"title": "T"}});
        let err = AsyncApi::from_value(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info.version".into()
            }
        );
    }

    #[test]
    fn test_missing_info() {
        let doc = json!({"asyncapi": "3.0.0"});
        let err = AsyncApi::from_value(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info".into()
            }
        );
    }

    #[test]
    fn test_yaml_and_json_parse_identically() {
        let yaml = "asyncapi: 3.0.0\ninfo:\n  title: T\n  version: 0.1.0\n";
        let json_text = r#"{"asyncapi": "3.0.0", "info": {"title": "T", "version": "0.1.0"}}"#;
        assert_eq!(
            AsyncApi::parse(yaml).unwrap(),
            AsyncApi::parse(json_text).unwrap()
        );
    }

    #[test]
    fn test_unparseable_input_is_syntax_error() {
        let err = AsyncApi::parse("{invalid: [").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
    }

    #[test]
    fn test_scalar_root_is_shape_mismatch() {
        let err = AsyncApi::from_value(&json!("not a document")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                path: "$".into(),
                expected: "mapping".into(),
                actual: "string".into(),
            }
        );
    }

    #[test]
    fn test_custom_depth_limit() {
        let mut payload = json!({"type": "string"});
        for _ in 0..4 {
            payload = json!({"type": "object", "properties": {"inner": payload}});
        }
        let doc = json!({
            "asyncapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "channels": {"c": {"messages": {"m": {"payload": payload}}}},
        });
        assert!(AsyncApi::from_value(&doc).is_ok());

        let tight = DecodeOptions { max_depth: 3 };
        let err = AsyncApi::from_value_with(&doc, &tight).unwrap_err();
        assert!(matches!(err, DecodeError::DepthExceeded { limit: 3, .. }));

        let roomy = DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        };
        assert!(AsyncApi::from_value_with(&doc, &roomy).is_ok());
    }
}

#![deny(missing_docs)]

//! # Server Objects
//!
//! Connection details for message brokers and other programs capable of
//! sending or receiving data, plus URL-template variables.

use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::reference::{decode_ref_map, encode_ref_map, RefOr};
use crate::tag::{decode_tag_list, encode_tag_list, ExternalDocumentation, Tag};
use indexmap::IndexMap;
use serde_json::Value;

/// A Server Variable for server URL template substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerVariable {
    /// Allowed substitution values, when drawn from a limited set.
    pub enum_values: Option<Vec<String>>,
    /// The default value to use for substitution.
    pub default: Option<String>,
    /// An optional description for the server variable.
    pub description: Option<String>,
    /// Example values of the server variable.
    pub examples: Option<Vec<String>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl ServerVariable {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            enum_values: fields.opt_str_list("enum", None)?,
            default: fields.opt_str("default", None)?,
            description: fields.opt_str("description", None)?,
            examples: fields.opt_str_list("examples", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str_list("enum", None, &self.enum_values);
        out.str("default", None, &self.default);
        out.str("description", None, &self.description);
        out.str_list("examples", None, &self.examples);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A message broker, server, or any other program capable of sending and/or
/// receiving data.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    /// The server host name; may include the port.
    pub host: String,
    /// The protocol this server supports for connection.
    pub protocol: String,
    /// The version of the protocol used for connection.
    pub protocol_version: Option<String>,
    /// The path to a resource in the host.
    pub pathname: Option<String>,
    /// An optional string describing the server.
    pub description: Option<String>,
    /// A human-friendly title for the server.
    pub title: Option<String>,
    /// A short summary of the server.
    pub summary: Option<String>,
    /// URL-template variables by name.
    pub variables: Option<IndexMap<String, RefOr<ServerVariable>>>,
    /// Security requirements for this server, kept opaque.
    pub security: Option<Vec<Value>>,
    /// Tags for logical grouping of servers.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Server {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let host = fields.req_str("host", None)?;
        let protocol = fields.req_str("protocol", None)?;
        let protocol_version = fields.opt_str("protocol_version", Some("protocolVersion"))?;
        let pathname = fields.opt_str("pathname", None)?;
        let description = fields.opt_str("description", None)?;
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let variables = match fields.optional("variables", None)? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("variables"),
                ServerVariable::decode,
            )?),
            None => None,
        };
        let security = fields.opt_value_list("security", None)?;
        let tags = match fields.optional("tags", None)? {
            Some(value) => Some(decode_tag_list(value, &fields.at("tags"))?),
            None => None,
        };
        let external_docs = match fields.optional("external_docs", Some("externalDocs"))? {
            Some(value) => Some(ExternalDocumentation::decode(
                value,
                &fields.at("external_docs"),
            )?),
            None => None,
        };
        let bindings = fields.opt_value("bindings", None)?;
        Ok(Self {
            host,
            protocol,
            protocol_version,
            pathname,
            description,
            title,
            summary,
            variables,
            security,
            tags,
            external_docs,
            bindings,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("host", None, &self.host);
        out.req_str("protocol", None, &self.protocol);
        out.str("protocol_version", Some("protocolVersion"), &self.protocol_version);
        out.str("pathname", None, &self.pathname);
        out.str("description", None, &self.description);
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        if let Some(variables) = &self.variables {
            out.set(
                "variables",
                None,
                encode_ref_map(variables, naming, |v| v.encode(naming)),
            );
        }
        out.value_list("security", None, &self.security);
        if let Some(tags) = &self.tags {
            out.set("tags", None, encode_tag_list(tags, naming));
        }
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.value("bindings", None, &self.bindings);
        out.extensions(&self.extensions);
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_server_roundtrip() {
        let doc = json!({
            "host": "mqtt.example.com:{port}",
            "protocol": "mqtt",
            "protocolVersion": "5.0",
            "description": "Production broker",
            "variables": {
                "port": {"enum": ["1883", "8883"], "default": "1883"},
            },
            "bindings": {"mqtt": {"clientId": "app"}},
            "x-region": "eu-west-1",
        });
        let server = Server::decode(&doc, &Path::root().child("servers").child("prod")).unwrap();
        assert_eq!(server.host, "mqtt.example.com:{port}");
        assert_eq!(server.protocol_version.as_deref(), Some("5.0"));
        let port = server.variables.as_ref().unwrap()["port"].as_item().unwrap();
        assert_eq!(port.default.as_deref(), Some("1883"));
        assert_eq!(server.extensions["x-region"], json!("eu-west-1"));
        assert_eq!(server.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_server_requires_host_and_protocol() {
        let doc = json!({"protocol": "kafka"});
        let err = Server::decode(&doc, &Path::root().child("servers").child("s")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "servers.s.host".into()
            }
        );
    }

    #[test]
    fn test_server_variable_reference() {
        let doc = json!({
            "host": "h",
            "protocol": "amqp",
            "variables": {"env": {"$ref": "#/components/serverVariables/env"}},
        });
        let server = Server::decode(&doc, &Path::root()).unwrap();
        let env = server.variables.as_ref().unwrap()["env"]
            .as_reference()
            .unwrap();
        assert_eq!(env.ref_path, "#/components/serverVariables/env");
        assert_eq!(server.encode(FieldNaming::Wire), doc);
    }
}

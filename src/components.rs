#![deny(missing_docs)]

//! # Components
//!
//! The reusable-object store. Every entry is addressable via `$ref` and is
//! kept fully typed here so a document's component definitions round-trip
//! with the same fidelity as inline ones.

use crate::channel::{Channel, CorrelationId, Message, MessageTrait, Parameter};
use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::operation::{Operation, OperationReply, OperationReplyAddress, OperationTrait};
use crate::reference::{decode_ref_map, encode_ref_map, RefOr};
use crate::schema::{Depth, PayloadSchema};
use crate::security::SecurityScheme;
use crate::server::{Server, ServerVariable};
use crate::tag::{ExternalDocumentation, Tag};
use indexmap::IndexMap;
use serde_json::Value;

/// Holds reusable objects for the rest of the document to reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    /// Reusable schemas, plain or multi-format.
    pub schemas: Option<IndexMap<String, RefOr<PayloadSchema>>>,
    /// Reusable server objects.
    pub servers: Option<IndexMap<String, RefOr<Server>>>,
    /// Reusable channel objects.
    pub channels: Option<IndexMap<String, RefOr<Channel>>>,
    /// Reusable operation objects.
    pub operations: Option<IndexMap<String, RefOr<Operation>>>,
    /// Reusable message objects.
    pub messages: Option<IndexMap<String, RefOr<Message>>>,
    /// Reusable security schemes.
    pub security_schemes: Option<IndexMap<String, RefOr<SecurityScheme>>>,
    /// Reusable server variables.
    pub server_variables: Option<IndexMap<String, RefOr<ServerVariable>>>,
    /// Reusable channel parameters.
    pub parameters: Option<IndexMap<String, RefOr<Parameter>>>,
    /// Reusable correlation ids.
    pub correlation_ids: Option<IndexMap<String, RefOr<CorrelationId>>>,
    /// Reusable operation replies.
    pub replies: Option<IndexMap<String, RefOr<OperationReply>>>,
    /// Reusable operation reply addresses.
    pub reply_addresses: Option<IndexMap<String, RefOr<OperationReplyAddress>>>,
    /// Reusable external documentation objects.
    pub external_docs: Option<IndexMap<String, RefOr<ExternalDocumentation>>>,
    /// Reusable tag objects.
    pub tags: Option<IndexMap<String, RefOr<Tag>>>,
    /// Reusable operation traits.
    pub operation_traits: Option<IndexMap<String, RefOr<OperationTrait>>>,
    /// Reusable message traits.
    pub message_traits: Option<IndexMap<String, RefOr<MessageTrait>>>,
    /// Reusable server bindings, kept opaque.
    pub server_bindings: Option<IndexMap<String, Value>>,
    /// Reusable channel bindings, kept opaque.
    pub channel_bindings: Option<IndexMap<String, Value>>,
    /// Reusable operation bindings, kept opaque.
    pub operation_bindings: Option<IndexMap<String, Value>>,
    /// Reusable message bindings, kept opaque.
    pub message_bindings: Option<IndexMap<String, Value>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Components {
    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let schemas = match fields.optional("schemas", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("schemas"), |v, p| {
                PayloadSchema::decode(v, p, depth)
            })?),
            None => None,
        };
        let servers = match fields.optional("servers", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("servers"), Server::decode)?),
            None => None,
        };
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
        let messages = match fields.optional("messages", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("messages"), |v, p| {
                Message::decode(v, p, depth)
            })?),
            None => None,
        };
        let security_schemes = match fields.optional("security_schemes", Some("securitySchemes"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("security_schemes"),
                SecurityScheme::decode,
            )?),
            None => None,
        };
        let server_variables = match fields.optional("server_variables", Some("serverVariables"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("server_variables"),
                ServerVariable::decode,
            )?),
            None => None,
        };
        let parameters = match fields.optional("parameters", None)? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("parameters"),
                Parameter::decode,
            )?),
            None => None,
        };
        let correlation_ids = match fields.optional("correlation_ids", Some("correlationIds"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("correlation_ids"),
                CorrelationId::decode,
            )?),
            None => None,
        };
        let replies = match fields.optional("replies", None)? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("replies"),
                OperationReply::decode,
            )?),
            None => None,
        };
        let reply_addresses = match fields.optional("reply_addresses", Some("replyAddresses"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("reply_addresses"),
                OperationReplyAddress::decode,
            )?),
            None => None,
        };
        let external_docs = match fields.optional("external_docs", Some("externalDocs"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("external_docs"),
                ExternalDocumentation::decode,
            )?),
            None => None,
        };
        let tags = match fields.optional("tags", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("tags"), Tag::decode)?),
            None => None,
        };
        let operation_traits = match fields.optional("operation_traits", Some("operationTraits"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("operation_traits"),
                OperationTrait::decode,
            )?),
            None => None,
        };
        let message_traits = match fields.optional("message_traits", Some("messageTraits"))? {
            Some(value) => Some(decode_ref_map(
                value,
                &fields.at("message_traits"),
                |v, p| MessageTrait::decode(v, p, depth),
            )?),
            None => None,
        };
        let server_bindings = fields.opt_value_map("server_bindings", Some("serverBindings"))?;
        let channel_bindings = fields.opt_value_map("channel_bindings", Some("channelBindings"))?;
        let operation_bindings =
            fields.opt_value_map("operation_bindings", Some("operationBindings"))?;
        let message_bindings = fields.opt_value_map("message_bindings", Some("messageBindings"))?;
        Ok(Self {
            schemas,
            servers,
            channels,
            operations,
            messages,
            security_schemes,
            server_variables,
            parameters,
            correlation_ids,
            replies,
            reply_addresses,
            external_docs,
            tags,
            operation_traits,
            message_traits,
            server_bindings,
            channel_bindings,
            operation_bindings,
            message_bindings,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        if let Some(map) = &self.schemas {
            out.set(
                "schemas",
                None,
                encode_ref_map(map, naming, |s| s.encode(naming)),
            );
        }
        if let Some(map) = &self.servers {
            out.set(
                "servers",
                None,
                encode_ref_map(map, naming, |s| s.encode(naming)),
            );
        }
        if let Some(map) = &self.channels {
            out.set(
                "channels",
                None,
                encode_ref_map(map, naming, |c| c.encode(naming)),
            );
        }
        if let Some(map) = &self.operations {
            out.set(
                "operations",
                None,
                encode_ref_map(map, naming, |o| o.encode(naming)),
            );
        }
        if let Some(map) = &self.messages {
            out.set(
                "messages",
                None,
                encode_ref_map(map, naming, |m| m.encode(naming)),
            );
        }
        if let Some(map) = &self.security_schemes {
            out.set(
                "security_schemes",
                Some("securitySchemes"),
                encode_ref_map(map, naming, |s| s.encode(naming)),
            );
        }
        if let Some(map) = &self.server_variables {
            out.set(
                "server_variables",
                Some("serverVariables"),
                encode_ref_map(map, naming, |v| v.encode(naming)),
            );
        }
        if let Some(map) = &self.parameters {
            out.set(
                "parameters",
                None,
                encode_ref_map(map, naming, |p| p.encode(naming)),
            );
        }
        if let Some(map) = &self.correlation_ids {
            out.set(
                "correlation_ids",
                Some("correlationIds"),
                encode_ref_map(map, naming, |c| c.encode(naming)),
            );
        }
        if let Some(map) = &self.replies {
            out.set(
                "replies",
                None,
                encode_ref_map(map, naming, |r| r.encode(naming)),
            );
        }
        if let Some(map) = &self.reply_addresses {
            out.set(
                "reply_addresses",
                Some("replyAddresses"),
                encode_ref_map(map, naming, |a| a.encode(naming)),
            );
        }
        if let Some(map) = &self.external_docs {
            out.set(
                "external_docs",
                Some("externalDocs"),
                encode_ref_map(map, naming, |d| d.encode(naming)),
            );
        }
        if let Some(map) = &self.tags {
            out.set(
                "tags",
                None,
                encode_ref_map(map, naming, |t| t.encode(naming)),
            );
        }
        if let Some(map) = &self.operation_traits {
            out.set(
                "operation_traits",
                Some("operationTraits"),
                encode_ref_map(map, naming, |t| t.encode(naming)),
            );
        }
        if let Some(map) = &self.message_traits {
            out.set(
                "message_traits",
                Some("messageTraits"),
                encode_ref_map(map, naming, |t| t.encode(naming)),
            );
        }
        out.value_map(
            "server_bindings",
            Some("serverBindings"),
            &self.server_bindings,
        );
        out.value_map(
            "channel_bindings",
            Some("channelBindings"),
            &self.channel_bindings,
        );
        out.value_map(
            "operation_bindings",
            Some("operationBindings"),
            &self.operation_bindings,
        );
        out.value_map(
            "message_bindings",
            Some("messageBindings"),
            &self.message_bindings,
        );
        out.extensions(&self.extensions);
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::schema::{SchemaRef, DEFAULT_MAX_DEPTH};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn depth() -> Depth {
        Depth::new(DEFAULT_MAX_DEPTH)
    }

    #[test]
    fn test_components_roundtrip() {
        let doc = json!({
            "schemas": {
                "lightMeasuredPayload": {
                    "type": "object",
                    "properties": {"lumens": {"type": "integer", "minimum": 0}},
                },
                "sentAt": {
                    "schemaFormat": "application/schema+json;version=draft-07",
                    "schema": {"type": "string", "format": "date-time"},
                },
            },
            "messages": {
                "lightMeasured": {
                    "payload": {"$ref": "#/components/schemas/lightMeasuredPayload"},
                    "traits": [{"$ref": "#/components/messageTraits/commonHeaders"}],
                },
            },
            "messageTraits": {
                "commonHeaders": {
                    "headers": {
                        "type": "object",
                        "properties": {"my-app-header": {"type": "integer"}},
                    },
                },
            },
            "securitySchemes": {
                "apiKey": {"type": "apiKey", "in": "user"},
            },
            "correlationIds": {
                "default": {"location": "$message.header#/correlationId"},
            },
            "operationTraits": {
                "kafka": {"bindings": {"kafka": {"clientId": "my-app-id"}}},
            },
        });
        let path = Path::root().child("components");
        let components = Components::decode(&doc, &path, depth()).unwrap();

        let payload = components.schemas.as_ref().unwrap()["lightMeasuredPayload"]
            .as_item()
            .unwrap();
        assert!(matches!(
            payload.as_schema(),
            Some(SchemaRef::Item(_))
        ));
        let sent_at = components.schemas.as_ref().unwrap()["sentAt"]
            .as_item()
            .unwrap();
        assert!(sent_at.as_schema().is_none());

        let message = components.messages.as_ref().unwrap()["lightMeasured"]
            .as_item()
            .unwrap();
        assert!(message.payload.is_some());

        assert_eq!(components.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_component_error_paths_are_qualified() {
        let doc = json!({
            "correlationIds": {"default": {"description": "no location"}},
        });
        let path = Path::root().child("components");
        let err = Components::decode(&doc, &path, depth()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "components.correlation_ids.default.location".into()
            }
        );
    }
}

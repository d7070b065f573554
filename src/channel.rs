#![deny(missing_docs)]

//! # Channel Objects
//!
//! Channels, the messages flowing through them, message traits and examples,
//! address parameters and correlation ids.

use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::reference::{
    decode_ref_list, decode_ref_map, decode_reference_list, encode_ref_list, encode_ref_map,
    encode_reference_list, RefOr, Reference,
};
use crate::schema::{Depth, PayloadSchema};
use crate::tag::{decode_tag_list, encode_tag_list, ExternalDocumentation, Tag};
use indexmap::IndexMap;
use serde_json::Value;

/// A Correlation ID: a runtime expression locating the value used to
/// correlate a message with others in a request/reply exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationId {
    /// An optional description of the identifier.
    pub description: Option<String>,
    /// A runtime expression specifying the identifier's location.
    pub location: String,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl CorrelationId {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            description: fields.opt_str("description", None)?,
            location: fields.req_str("location", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("description", None, &self.description);
        out.req_str("location", None, &self.location);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// An example of a message's headers and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageExample {
    /// Example headers, kept opaque.
    pub headers: Option<Value>,
    /// Example payload, kept opaque.
    pub payload: Option<Value>,
    /// A machine-friendly name for the example.
    pub name: Option<String>,
    /// A short summary of what the example is about.
    pub summary: Option<String>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl MessageExample {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            headers: fields.opt_value("headers", None)?,
            payload: fields.opt_value("payload", None)?,
            name: fields.opt_str("name", None)?,
            summary: fields.opt_str("summary", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.value("headers", None, &self.headers);
        out.value("payload", None, &self.payload);
        out.str("name", None, &self.name);
        out.str("summary", None, &self.summary);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A message flowing through a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Schema for the message headers.
    pub headers: Option<PayloadSchema>,
    /// Schema for the message payload.
    pub payload: Option<PayloadSchema>,
    /// Correlation id definition or reference.
    pub correlation_id: Option<RefOr<CorrelationId>>,
    /// The content type to use when encoding/decoding this message.
    pub content_type: Option<String>,
    /// A machine-friendly name for the message.
    pub name: Option<String>,
    /// A human-friendly title for the message.
    pub title: Option<String>,
    /// A short summary of what the message is about.
    pub summary: Option<String>,
    /// A verbose explanation of the message.
    pub description: Option<String>,
    /// Tags for logical grouping of messages.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Examples of valid message objects.
    pub examples: Option<Vec<MessageExample>>,
    /// Traits to apply to the message object.
    pub traits: Option<Vec<RefOr<MessageTrait>>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Message {
    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let headers = match fields.optional("headers", None)? {
            Some(value) => Some(PayloadSchema::decode(value, &fields.at("headers"), depth)?),
            None => None,
        };
        let payload = match fields.optional("payload", None)? {
            Some(value) => Some(PayloadSchema::decode(value, &fields.at("payload"), depth)?),
            None => None,
        };
        let correlation_id = match fields.optional("correlation_id", Some("correlationId"))? {
            Some(value) => Some(RefOr::decode_with(
                value,
                &fields.at("correlation_id"),
                CorrelationId::decode,
            )?),
            None => None,
        };
        let content_type = fields.opt_str("content_type", Some("contentType"))?;
        let name = fields.opt_str("name", None)?;
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let description = fields.opt_str("description", None)?;
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
        let examples = match fields.optional("examples", None)? {
            Some(value) => {
                let path = fields.at("examples");
                let items = crate::fields::expect_array(value, &path)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(MessageExample::decode(item, &path.index(i))?);
                }
                Some(out)
            }
            None => None,
        };
        let traits = match fields.optional("traits", None)? {
            Some(value) => Some(decode_ref_list(value, &fields.at("traits"), |v, p| {
                MessageTrait::decode(v, p, depth)
            })?),
            None => None,
        };
        Ok(Self {
            headers,
            payload,
            correlation_id,
            content_type,
            name,
            title,
            summary,
            description,
            tags,
            external_docs,
            bindings,
            examples,
            traits,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        if let Some(headers) = &self.headers {
            out.set("headers", None, headers.encode(naming));
        }
        if let Some(payload) = &self.payload {
            out.set("payload", None, payload.encode(naming));
        }
        if let Some(correlation_id) = &self.correlation_id {
            out.set(
                "correlation_id",
                Some("correlationId"),
                correlation_id.encode_with(naming, |c| c.encode(naming)),
            );
        }
        out.str("content_type", Some("contentType"), &self.content_type);
        out.str("name", None, &self.name);
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        out.str("description", None, &self.description);
        if let Some(tags) = &self.tags {
            out.set("tags", None, encode_tag_list(tags, naming));
        }
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.value("bindings", None, &self.bindings);
        if let Some(examples) = &self.examples {
            let encoded = examples.iter().map(|e| e.encode(naming)).collect();
            out.set("examples", None, Value::Array(encoded));
        }
        if let Some(traits) = &self.traits {
            out.set(
                "traits",
                None,
                encode_ref_list(traits, naming, |t| t.encode(naming)),
            );
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A trait that may be applied to a Message Object: every message field
/// except the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTrait {
    /// Schema for the message headers.
    pub headers: Option<PayloadSchema>,
    /// Correlation id definition or reference.
    pub correlation_id: Option<RefOr<CorrelationId>>,
    /// The content type to use when encoding/decoding this message.
    pub content_type: Option<String>,
    /// A machine-friendly name for the message.
    pub name: Option<String>,
    /// A human-friendly title for the message.
    pub title: Option<String>,
    /// A short summary of what the message is about.
    pub summary: Option<String>,
    /// A verbose explanation of the message.
    pub description: Option<String>,
    /// Tags for logical grouping of messages.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Examples of valid message objects.
    pub examples: Option<Vec<MessageExample>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl MessageTrait {
    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let headers = match fields.optional("headers", None)? {
            Some(value) => Some(PayloadSchema::decode(value, &fields.at("headers"), depth)?),
            None => None,
        };
        let correlation_id = match fields.optional("correlation_id", Some("correlationId"))? {
            Some(value) => Some(RefOr::decode_with(
                value,
                &fields.at("correlation_id"),
                CorrelationId::decode,
            )?),
            None => None,
        };
        let content_type = fields.opt_str("content_type", Some("contentType"))?;
        let name = fields.opt_str("name", None)?;
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let description = fields.opt_str("description", None)?;
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
        let examples = match fields.optional("examples", None)? {
            Some(value) => {
                let path = fields.at("examples");
                let items = crate::fields::expect_array(value, &path)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(MessageExample::decode(item, &path.index(i))?);
                }
                Some(out)
            }
            None => None,
        };
        Ok(Self {
            headers,
            correlation_id,
            content_type,
            name,
            title,
            summary,
            description,
            tags,
            external_docs,
            bindings,
            examples,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        if let Some(headers) = &self.headers {
            out.set("headers", None, headers.encode(naming));
        }
        if let Some(correlation_id) = &self.correlation_id {
            out.set(
                "correlation_id",
                Some("correlationId"),
                correlation_id.encode_with(naming, |c| c.encode(naming)),
            );
        }
        out.str("content_type", Some("contentType"), &self.content_type);
        out.str("name", None, &self.name);
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        out.str("description", None, &self.description);
        if let Some(tags) = &self.tags {
            out.set("tags", None, encode_tag_list(tags, naming));
        }
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.value("bindings", None, &self.bindings);
        if let Some(examples) = &self.examples {
            let encoded = examples.iter().map(|e| e.encode(naming)).collect();
            out.set("examples", None, Value::Array(encoded));
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A parameter included in a channel address.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Allowed parameter values, when drawn from a limited set.
    pub enum_values: Option<Vec<String>>,
    /// The default value to use for substitution.
    pub default: Option<String>,
    /// An optional description of the parameter.
    pub description: Option<String>,
    /// Example values of the parameter.
    pub examples: Option<Vec<String>>,
    /// A runtime expression specifying the parameter's location.
    pub location: Option<String>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Parameter {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            enum_values: fields.opt_str_list("enum", None)?,
            default: fields.opt_str("default", None)?,
            description: fields.opt_str("description", None)?,
            examples: fields.opt_str_list("examples", None)?,
            location: fields.opt_str("location", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str_list("enum", None, &self.enum_values);
        out.str("default", None, &self.default);
        out.str("description", None, &self.description);
        out.str_list("examples", None, &self.examples);
        out.str("location", None, &self.location);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A channel: an addressable component messages flow through.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// The channel address. May be omitted (or `null`) when unknown.
    pub address: Option<String>,
    /// Messages that can flow through this channel, by name.
    pub messages: Option<IndexMap<String, RefOr<Message>>>,
    /// A human-friendly title for the channel.
    pub title: Option<String>,
    /// A short summary of the channel.
    pub summary: Option<String>,
    /// A verbose explanation of the channel.
    pub description: Option<String>,
    /// References to the servers this channel is available on.
    pub servers: Option<Vec<Reference>>,
    /// Address parameters, by name.
    pub parameters: Option<IndexMap<String, RefOr<Parameter>>>,
    /// Tags for logical grouping of channels.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Channel {
    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let address = fields.opt_str("address", None)?;
        let messages = match fields.optional("messages", None)? {
            Some(value) => Some(decode_ref_map(value, &fields.at("messages"), |v, p| {
                Message::decode(v, p, depth)
            })?),
            None => None,
        };
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let description = fields.opt_str("description", None)?;
        let servers = match fields.optional("servers", None)? {
            Some(value) => Some(decode_reference_list(value, &fields.at("servers"))?),
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
            address,
            messages,
            title,
            summary,
            description,
            servers,
            parameters,
            tags,
            external_docs,
            bindings,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("address", None, &self.address);
        if let Some(messages) = &self.messages {
            out.set(
                "messages",
                None,
                encode_ref_map(messages, naming, |m| m.encode(naming)),
            );
        }
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        out.str("description", None, &self.description);
        if let Some(servers) = &self.servers {
            out.set("servers", None, encode_reference_list(servers, naming));
        }
        if let Some(parameters) = &self.parameters {
            out.set(
                "parameters",
                None,
                encode_ref_map(parameters, naming, |p| p.encode(naming)),
            );
        }
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

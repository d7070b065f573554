#![deny(missing_docs)]

//! # Operation Objects
//!
//! Operations describe what an application does with a channel: send or
//! receive. Includes operation traits and request/reply metadata.

use crate::error::{DecodeError, DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::reference::{
    decode_ref_list, decode_reference_list, encode_ref_list, encode_reference_list, RefOr,
    Reference,
};
use crate::tag::{decode_tag_list, encode_tag_list, ExternalDocumentation, Tag};
use serde_json::Value;

/// What an operation does with its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationAction {
    /// The application sends messages to the channel.
    Send,
    /// The application receives messages from the channel.
    Receive,
}

impl OperationAction {
    /// The wire spelling of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }

    pub(crate) fn parse(raw: &str, path: &Path) -> DecodeResult<Self> {
        match raw {
            "send" => Ok(Self::Send),
            "receive" => Ok(Self::Receive),
            _ => Err(DecodeError::format(path, "send|receive")),
        }
    }
}

/// Reusable address metadata for an operation reply.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationReplyAddress {
    /// An optional description of the address.
    pub description: Option<String>,
    /// A runtime expression specifying the reply address location.
    pub location: String,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl OperationReplyAddress {
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

/// Where and how an operation's reply flows.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationReply {
    /// Where the reply should be sent.
    pub address: Option<RefOr<OperationReplyAddress>>,
    /// Reference to the channel the reply flows through.
    pub channel: Option<Reference>,
    /// References to messages usable for the reply.
    pub messages: Option<Vec<Reference>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl OperationReply {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let address = match fields.optional("address", None)? {
            Some(value) => Some(RefOr::decode_with(
                value,
                &fields.at("address"),
                OperationReplyAddress::decode,
            )?),
            None => None,
        };
        let channel = match fields.optional("channel", None)? {
            Some(value) => Some(Reference::decode(value, &fields.at("channel"))?),
            None => None,
        };
        let messages = match fields.optional("messages", None)? {
            Some(value) => Some(decode_reference_list(value, &fields.at("messages"))?),
            None => None,
        };
        Ok(Self {
            address,
            channel,
            messages,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        if let Some(address) = &self.address {
            out.set(
                "address",
                None,
                address.encode_with(naming, |a| a.encode(naming)),
            );
        }
        if let Some(channel) = &self.channel {
            out.set("channel", None, channel.encode(naming));
        }
        if let Some(messages) = &self.messages {
            out.set("messages", None, encode_reference_list(messages, naming));
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A trait that may be applied to an Operation Object.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationTrait {
    /// A human-friendly title for the operation.
    pub title: Option<String>,
    /// A short summary of what the operation is about.
    pub summary: Option<String>,
    /// A verbose explanation of the operation.
    pub description: Option<String>,
    /// Security requirement declarations, kept opaque.
    pub security: Option<Vec<Value>>,
    /// Tags for logical grouping of operations.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl OperationTrait {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let description = fields.opt_str("description", None)?;
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
            title,
            summary,
            description,
            security,
            tags,
            external_docs,
            bindings,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        out.str("description", None, &self.description);
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

/// An operation: a send or receive performed against one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Whether the application sends to or receives from the channel.
    pub action: OperationAction,
    /// Reference to the channel this operation acts on.
    pub channel: Reference,
    /// A human-friendly title for the operation.
    pub title: Option<String>,
    /// A short summary of what the operation is about.
    pub summary: Option<String>,
    /// A verbose explanation of the operation.
    pub description: Option<String>,
    /// Security requirement declarations, kept opaque.
    pub security: Option<Vec<Value>>,
    /// Tags for logical grouping of operations.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Protocol-specific binding definitions, kept opaque.
    pub bindings: Option<Value>,
    /// Traits to apply to the operation object.
    pub traits: Option<Vec<RefOr<OperationTrait>>>,
    /// References to the channel messages this operation works with.
    pub messages: Option<Vec<Reference>>,
    /// The reply this operation expects, when part of a request/reply pair.
    pub reply: Option<RefOr<OperationReply>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Operation {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let action = {
            let raw = fields.req_str("action", None)?;
            OperationAction::parse(&raw, &fields.at("action"))?
        };
        let channel = {
            let value = fields.required("channel", None)?;
            Reference::decode(value, &fields.at("channel"))?
        };
        let title = fields.opt_str("title", None)?;
        let summary = fields.opt_str("summary", None)?;
        let description = fields.opt_str("description", None)?;
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
        let traits = match fields.optional("traits", None)? {
            Some(value) => Some(decode_ref_list(
                value,
                &fields.at("traits"),
                OperationTrait::decode,
            )?),
            None => None,
        };
        let messages = match fields.optional("messages", None)? {
            Some(value) => Some(decode_reference_list(value, &fields.at("messages"))?),
            None => None,
        };
        let reply = match fields.optional("reply", None)? {
            Some(value) => Some(RefOr::decode_with(
                value,
                &fields.at("reply"),
                OperationReply::decode,
            )?),
            None => None,
        };
        Ok(Self {
            action,
            channel,
            title,
            summary,
            description,
            security,
            tags,
            external_docs,
            bindings,
            traits,
            messages,
            reply,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("action", None, self.action.as_str());
        out.set("channel", None, self.channel.encode(naming));
        out.str("title", None, &self.title);
        out.str("summary", None, &self.summary);
        out.str("description", None, &self.description);
        out.value_list("security", None, &self.security);
        if let Some(tags) = &self.tags {
            out.set("tags", None, encode_tag_list(tags, naming));
        }
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.value("bindings", None, &self.bindings);
        if let Some(traits) = &self.traits {
            out.set(
                "traits",
                None,
                encode_ref_list(traits, naming, |t| t.encode(naming)),
            );
        }
        if let Some(messages) = &self.messages {
            out.set("messages", None, encode_reference_list(messages, naming));
        }
        if let Some(reply) = &self.reply {
            out.set(
                "reply",
                None,
                reply.encode_with(naming, |r| r.encode(naming)),
            );
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_operation_roundtrip() {
        let doc = json!({
            "action": "receive",
            "channel": {"$ref": "#/channels/lightingMeasured"},
            "summary": "Inform about environmental lighting conditions.",
            "traits": [{"$ref": "#/components/operationTraits/kafka"}],
            "messages": [
                {"$ref": "#/channels/lightingMeasured/messages/lightMeasured"},
            ],
            "reply": {
                "address": {"location": "$message.header#/replyTo"},
                "channel": {"$ref": "#/channels/ack"},
            },
            "x-internal": false,
        });
        let path = Path::root().child("operations").child("receiveLightMeasurement");
        let operation = Operation::decode(&doc, &path).unwrap();
        assert_eq!(operation.action, OperationAction::Receive);
        assert_eq!(operation.channel.ref_path, "#/channels/lightingMeasured");
        let reply = operation.reply.as_ref().unwrap().as_item().unwrap();
        assert_eq!(
            reply
                .address
                .as_ref()
                .unwrap()
                .as_item()
                .unwrap()
                .location,
            "$message.header#/replyTo"
        );
        assert_eq!(operation.extensions["x-internal"], json!(false));
        assert_eq!(operation.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_unknown_action_is_format_violation() {
        let doc = json!({"action": "publish", "channel": {"$ref": "#/channels/c"}});
        let path = Path::root().child("operations").child("onLight");
        let err = Operation::decode(&doc, &path).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FormatViolation {
                path: "operations.onLight.action".into(),
                pattern: "send|receive".into(),
            }
        );
    }

    #[test]
    fn test_missing_channel() {
        let doc = json!({"action": "send"});
        let err = Operation::decode(&doc, &Path::root().child("op")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "op.channel".into()
            }
        );
    }
}

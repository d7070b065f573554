#![deny(missing_docs)]

//! # AsyncAPI Models
//!
//! Typed models for message-driven API description documents, with
//! alias-aware decoding, verbatim extension capture, and naming-configurable
//! re-encoding.

/// Validation error taxonomy and path tracking.
pub mod error;

/// Alias-aware field lookup and extension capture.
pub mod fields;

/// Opaque `$ref` pointers and reference-or-item slots.
pub mod reference;

/// Tags and external documentation.
pub mod tag;

/// The recursive schema core.
pub mod schema;

/// API metadata: info, contact, license.
pub mod info;

/// Server and server variable objects.
pub mod server;

/// Channels, messages, parameters and correlation ids.
pub mod channel;

/// Operations, traits and request/reply metadata.
pub mod operation;

/// Security schemes and OAuth flows.
pub mod security;

/// The reusable-object store.
pub mod components;

/// The document root and parsing entry points.
pub mod document;

pub use channel::{Channel, CorrelationId, Message, MessageExample, MessageTrait, Parameter};
pub use components::Components;
pub use document::AsyncApi;
pub use error::{DecodeError, DecodeResult, Path};
pub use fields::{Extensions, FieldNaming};
pub use info::{Contact, Info, License};
pub use operation::{
    Operation, OperationAction, OperationReply, OperationReplyAddress, OperationTrait,
};
pub use reference::{RefOr, Reference};
pub use schema::{
    DecodeOptions, MultiFormatSchema, PayloadSchema, Schema, SchemaItems, SchemaRef, SchemaType,
    DEFAULT_MAX_DEPTH,
};
pub use security::{OAuthFlow, OAuthFlows, SecurityScheme, SecuritySchemeType};
pub use server::{Server, ServerVariable};
pub use tag::{ExternalDocumentation, Tag};

#![deny(missing_docs)]

//! # Tags & External Documentation
//!
//! Flat leaf objects used for categorization across the document.

use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use serde_json::Value;

/// Adds metadata to a single tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// The name of the tag.
    pub name: String,
    /// A short description for the tag.
    pub description: Option<String>,
    /// Additional external documentation for this tag.
    pub external_docs: Option<ExternalDocumentation>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Tag {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let name = fields.req_str("name", None)?;
        let description = fields.opt_str("description", None)?;
        let external_docs = match fields.optional("external_docs", Some("externalDocs"))? {
            Some(value) => Some(ExternalDocumentation::decode(
                value,
                &fields.at("external_docs"),
            )?),
            None => None,
        };
        Ok(Self {
            name,
            description,
            external_docs,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("name", None, &self.name);
        out.str("description", None, &self.description);
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// Allows referencing an external resource for extended documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDocumentation {
    /// A short description of the target documentation.
    pub description: Option<String>,
    /// The URL for the target documentation.
    pub url: String,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl ExternalDocumentation {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let description = fields.opt_str("description", None)?;
        let url = fields.req_str("url", None)?;
        Ok(Self {
            description,
            url,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("description", None, &self.description);
        out.req_str("url", None, &self.url);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// Decodes an ordered list of tags.
pub(crate) fn decode_tag_list(value: &Value, path: &Path) -> DecodeResult<Vec<Tag>> {
    let items = crate::fields::expect_array(value, path)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(Tag::decode(item, &path.index(i))?);
    }
    Ok(out)
}

/// Encodes an ordered list of tags.
pub(crate) fn encode_tag_list(tags: &[Tag], naming: FieldNaming) -> Value {
    Value::Array(tags.iter().map(|tag| tag.encode(naming)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tag_roundtrip() {
        let doc = json!({
            "name": "measurement",
            "description": "Sensor readings",
            "externalDocs": {"url": "https://example.com/docs"},
            "x-team": "iot",
        });
        let tag = Tag::decode(&doc, &Path::root()).unwrap();
        assert_eq!(tag.name, "measurement");
        assert_eq!(
            tag.external_docs.as_ref().map(|d| d.url.as_str()),
            Some("https://example.com/docs")
        );
        assert_eq!(tag.extensions["x-team"], json!("iot"));
        assert_eq!(tag.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_external_docs_requires_url() {
        let doc = json!({"description": "no url"});
        let err =
            ExternalDocumentation::decode(&doc, &Path::root().child("externalDocs")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "externalDocs.url".into()
            }
        );
    }

    #[test]
    fn test_tag_canonical_encoding() {
        let doc = json!({
            "name": "t",
            "external_docs": {"url": "https://example.com"},
        });
        let tag = Tag::decode(&doc, &Path::root()).unwrap();
        assert_eq!(
            tag.encode(FieldNaming::Canonical),
            json!({"name": "t", "external_docs": {"url": "https://example.com"}})
        );
    }
}

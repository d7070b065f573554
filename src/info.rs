#![deny(missing_docs)]

//! # Info Objects
//!
//! Document metadata: the Info Object with its Contact and License children.

use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use crate::tag::{decode_tag_list, encode_tag_list, ExternalDocumentation, Tag};
use serde_json::Value;

/// Contact information for the exposed API.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// The identifying name of the contact person/organization.
    pub name: Option<String>,
    /// The URL pointing to the contact information.
    pub url: Option<String>,
    /// The email address of the contact person/organization.
    pub email: Option<String>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Contact {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            name: fields.opt_str("name", None)?,
            url: fields.opt_str("url", None)?,
            email: fields.opt_str("email", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("name", None, &self.name);
        out.str("url", None, &self.url);
        out.str("email", None, &self.email);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// License information for the exposed API.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    /// The license name used for the API.
    pub name: String,
    /// A URL to the license used for the API.
    pub url: Option<String>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl License {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        Ok(Self {
            name: fields.req_str("name", None)?,
            url: fields.opt_str("url", None)?,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("name", None, &self.name);
        out.str("url", None, &self.url);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// The title of the application.
    pub title: String,
    /// The version of the application API (not the specification version).
    pub version: String,
    /// A short description of the application.
    pub description: Option<String>,
    /// A URL to the Terms of Service for the API.
    pub terms_of_service: Option<String>,
    /// The contact information for the exposed API.
    pub contact: Option<Contact>,
    /// The license information for the exposed API.
    pub license: Option<License>,
    /// Tags for application API documentation control.
    pub tags: Option<Vec<Tag>>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl Info {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let title = fields.req_str("title", None)?;
        let version = fields.req_str("version", None)?;
        let description = fields.opt_str("description", None)?;
        let terms_of_service = fields.opt_str("terms_of_service", Some("termsOfService"))?;
        let contact = match fields.optional("contact", None)? {
            Some(value) => Some(Contact::decode(value, &fields.at("contact"))?),
            None => None,
        };
        let license = match fields.optional("license", None)? {
            Some(value) => Some(License::decode(value, &fields.at("license"))?),
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
        Ok(Self {
            title,
            version,
            description,
            terms_of_service,
            contact,
            license,
            tags,
            external_docs,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("title", None, &self.title);
        out.req_str("version", None, &self.version);
        out.str("description", None, &self.description);
        out.str("terms_of_service", Some("termsOfService"), &self.terms_of_service);
        if let Some(contact) = &self.contact {
            out.set("contact", None, contact.encode(naming));
        }
        if let Some(license) = &self.license {
            out.set("license", None, license.encode(naming));
        }
        if let Some(tags) = &self.tags {
            out.set("tags", None, encode_tag_list(tags, naming));
        }
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
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
    fn test_info_roundtrip() {
        let doc = json!({
            "title": "Streetlights API",
            "version": "1.0.0",
            "description": "Manage city lights.",
            "termsOfService": "https://example.com/terms",
            "contact": {"name": "Support", "email": "support@example.com"},
            "license": {"name": "Apache 2.0", "url": "https://www.apache.org/licenses/LICENSE-2.0"},
            "x-audience": "internal",
        });
        let info = Info::decode(&doc, &Path::root().child("info")).unwrap();
        assert_eq!(info.title, "Streetlights API");
        assert_eq!(info.contact.as_ref().unwrap().email.as_deref(), Some("support@example.com"));
        assert_eq!(info.extensions["x-audience"], json!("internal"));
        assert_eq!(info.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_info_missing_version() {
        let doc = json!({"title": "T"});
        let err = Info::decode(&doc, &Path::root().child("info")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info.version".into()
            }
        );
    }

    #[test]
    fn test_license_requires_name() {
        let doc = json!({"url": "https://example.com"});
        let err = License::decode(&doc, &Path::root().child("info").child("license")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info.license.name".into()
            }
        );
    }
}

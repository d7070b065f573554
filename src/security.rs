#![deny(missing_docs)]

//! # Security Schemes
//!
//! Security scheme definitions and the OAuth flow objects they carry. The
//! scheme `type` field is a closed enumeration; everything protocol-specific
//! beyond that stays opaque.

use crate::error::{DecodeError, DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use indexmap::IndexMap;
use serde_json::Value;

const SCHEME_TYPE_PATTERN: &str = "userPassword|apiKey|X509|symmetricEncryption|\
asymmetricEncryption|httpApiKey|http|oauth2|openIdConnect|plain|scramSha256|\
scramSha512|gssapi";

/// The closed set of security scheme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecuritySchemeType {
    /// Username/password credentials.
    UserPassword,
    /// A static API key.
    ApiKey,
    /// X.509 certificates.
    X509,
    /// Symmetric encryption.
    SymmetricEncryption,
    /// Asymmetric encryption.
    AsymmetricEncryption,
    /// An API key carried in an HTTP header, query, or cookie.
    HttpApiKey,
    /// An HTTP authentication scheme.
    Http,
    /// OAuth 2.0.
    OAuth2,
    /// OpenID Connect discovery.
    OpenIdConnect,
    /// SASL PLAIN.
    Plain,
    /// SASL SCRAM-SHA-256.
    ScramSha256,
    /// SASL SCRAM-SHA-512.
    ScramSha512,
    /// SASL GSSAPI.
    Gssapi,
}

impl SecuritySchemeType {
    /// The wire spelling of the scheme type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserPassword => "userPassword",
            Self::ApiKey => "apiKey",
            Self::X509 => "X509",
            Self::SymmetricEncryption => "symmetricEncryption",
            Self::AsymmetricEncryption => "asymmetricEncryption",
            Self::HttpApiKey => "httpApiKey",
            Self::Http => "http",
            Self::OAuth2 => "oauth2",
            Self::OpenIdConnect => "openIdConnect",
            Self::Plain => "plain",
            Self::ScramSha256 => "scramSha256",
            Self::ScramSha512 => "scramSha512",
            Self::Gssapi => "gssapi",
        }
    }

    pub(crate) fn parse(raw: &str, path: &Path) -> DecodeResult<Self> {
        match raw {
            "userPassword" => Ok(Self::UserPassword),
            "apiKey" => Ok(Self::ApiKey),
            "X509" => Ok(Self::X509),
            "symmetricEncryption" => Ok(Self::SymmetricEncryption),
            "asymmetricEncryption" => Ok(Self::AsymmetricEncryption),
            "httpApiKey" => Ok(Self::HttpApiKey),
            "http" => Ok(Self::Http),
            "oauth2" => Ok(Self::OAuth2),
            "openIdConnect" => Ok(Self::OpenIdConnect),
            "plain" => Ok(Self::Plain),
            "scramSha256" => Ok(Self::ScramSha256),
            "scramSha512" => Ok(Self::ScramSha512),
            "gssapi" => Ok(Self::Gssapi),
            _ => Err(DecodeError::format(path, SCHEME_TYPE_PATTERN)),
        }
    }
}

/// Configuration for one supported OAuth flow.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthFlow {
    /// The authorization URL for this flow.
    pub authorization_url: Option<String>,
    /// The token URL for this flow.
    pub token_url: Option<String>,
    /// The URL for obtaining refresh tokens.
    pub refresh_url: Option<String>,
    /// Available scopes, scope name to short description.
    pub available_scopes: IndexMap<String, String>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl OAuthFlow {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let authorization_url = fields.opt_str("authorization_url", Some("authorizationUrl"))?;
        let token_url = fields.opt_str("token_url", Some("tokenUrl"))?;
        let refresh_url = fields.opt_str("refresh_url", Some("refreshUrl"))?;
        let available_scopes = {
            let value = fields.required("available_scopes", Some("availableScopes"))?;
            let path = fields.at("available_scopes");
            let entries = crate::fields::expect_object(value, &path)?;
            let mut out = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(
                    key.clone(),
                    crate::fields::expect_str(item, &path.child(key))?,
                );
            }
            out
        };
        Ok(Self {
            authorization_url,
            token_url,
            refresh_url,
            available_scopes,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str(
            "authorization_url",
            Some("authorizationUrl"),
            &self.authorization_url,
        );
        out.str("token_url", Some("tokenUrl"), &self.token_url);
        out.str("refresh_url", Some("refreshUrl"), &self.refresh_url);
        out.str_map(
            "available_scopes",
            Some("availableScopes"),
            &Some(self.available_scopes.clone()),
        );
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// The OAuth flows supported by a security scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthFlows {
    /// The implicit flow.
    pub implicit: Option<OAuthFlow>,
    /// The resource owner password flow.
    pub password: Option<OAuthFlow>,
    /// The client credentials flow.
    pub client_credentials: Option<OAuthFlow>,
    /// The authorization code flow.
    pub authorization_code: Option<OAuthFlow>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl OAuthFlows {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let implicit = match fields.optional("implicit", None)? {
            Some(value) => Some(OAuthFlow::decode(value, &fields.at("implicit"))?),
            None => None,
        };
        let password = match fields.optional("password", None)? {
            Some(value) => Some(OAuthFlow::decode(value, &fields.at("password"))?),
            None => None,
        };
        let client_credentials =
            match fields.optional("client_credentials", Some("clientCredentials"))? {
                Some(value) => Some(OAuthFlow::decode(value, &fields.at("client_credentials"))?),
                None => None,
            };
        let authorization_code =
            match fields.optional("authorization_code", Some("authorizationCode"))? {
                Some(value) => Some(OAuthFlow::decode(value, &fields.at("authorization_code"))?),
                None => None,
            };
        Ok(Self {
            implicit,
            password,
            client_credentials,
            authorization_code,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        if let Some(flow) = &self.implicit {
            out.set("implicit", None, flow.encode(naming));
        }
        if let Some(flow) = &self.password {
            out.set("password", None, flow.encode(naming));
        }
        if let Some(flow) = &self.client_credentials {
            out.set(
                "client_credentials",
                Some("clientCredentials"),
                flow.encode(naming),
            );
        }
        if let Some(flow) = &self.authorization_code {
            out.set(
                "authorization_code",
                Some("authorizationCode"),
                flow.encode(naming),
            );
        }
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A security scheme usable by servers and operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityScheme {
    /// The scheme type.
    pub scheme_type: SecuritySchemeType,
    /// An optional description of the scheme.
    pub description: Option<String>,
    /// The name of the header, query, or cookie parameter (`httpApiKey`).
    pub name: Option<String>,
    /// Where the key lives, e.g. `user`, `header`, `query`, `cookie`.
    pub location: Option<String>,
    /// The HTTP authorization scheme name (`http`).
    pub scheme: Option<String>,
    /// A hint on how bearer tokens are formatted (`http` bearer).
    pub bearer_format: Option<String>,
    /// OAuth flow configuration (`oauth2`).
    pub flows: Option<OAuthFlows>,
    /// The OpenID Connect discovery URL (`openIdConnect`).
    pub open_id_connect_url: Option<String>,
    /// Scopes required for the connection (`oauth2`, `openIdConnect`).
    pub scopes: Option<Vec<String>>,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl SecurityScheme {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let scheme_type = {
            let raw = fields.req_str("type", None)?;
            SecuritySchemeType::parse(&raw, &fields.at("type"))?
        };
        let description = fields.opt_str("description", None)?;
        let name = fields.opt_str("name", None)?;
        let location = fields.opt_str("in", None)?;
        let scheme = fields.opt_str("scheme", None)?;
        let bearer_format = fields.opt_str("bearer_format", Some("bearerFormat"))?;
        let flows = match fields.optional("flows", None)? {
            Some(value) => Some(OAuthFlows::decode(value, &fields.at("flows"))?),
            None => None,
        };
        let open_id_connect_url =
            fields.opt_str("open_id_connect_url", Some("openIdConnectUrl"))?;
        let scopes = fields.opt_str_list("scopes", None)?;
        Ok(Self {
            scheme_type,
            description,
            name,
            location,
            scheme,
            bearer_format,
            flows,
            open_id_connect_url,
            scopes,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("type", None, self.scheme_type.as_str());
        out.str("description", None, &self.description);
        out.str("name", None, &self.name);
        out.str("in", None, &self.location);
        out.str("scheme", None, &self.scheme);
        out.str("bearer_format", Some("bearerFormat"), &self.bearer_format);
        if let Some(flows) = &self.flows {
            out.set("flows", None, flows.encode(naming));
        }
        out.str(
            "open_id_connect_url",
            Some("openIdConnectUrl"),
            &self.open_id_connect_url,
        );
        out.str_list("scopes", None, &self.scopes);
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
    fn test_http_api_key_roundtrip() {
        let doc = json!({
            "type": "httpApiKey",
            "name": "api_key",
            "in": "header",
            "description": "Provide your API key as the HTTP api_key header.",
        });
        let path = Path::root()
            .child("components")
            .child("securitySchemes")
            .child("apiKey");
        let scheme = SecurityScheme::decode(&doc, &path).unwrap();
        assert_eq!(scheme.scheme_type, SecuritySchemeType::HttpApiKey);
        assert_eq!(scheme.location.as_deref(), Some("header"));
        assert_eq!(scheme.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_oauth2_flows_roundtrip() {
        let doc = json!({
            "type": "oauth2",
            "flows": {
                "clientCredentials": {
                    "tokenUrl": "https://example.com/api/token",
                    "availableScopes": {
                        "streetlights:read": "Read streetlight data",
                        "streetlights:write": "Update streetlight data",
                    },
                },
            },
            "scopes": ["streetlights:read"],
        });
        let scheme = SecurityScheme::decode(&doc, &Path::root()).unwrap();
        let flow = scheme
            .flows
            .as_ref()
            .unwrap()
            .client_credentials
            .as_ref()
            .unwrap();
        assert_eq!(
            flow.token_url.as_deref(),
            Some("https://example.com/api/token")
        );
        assert_eq!(flow.available_scopes.len(), 2);
        assert_eq!(scheme.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_unknown_type_is_format_violation() {
        let doc = json!({"type": "basicAuth"});
        let path = Path::root().child("scheme");
        let err = SecurityScheme::decode(&doc, &path).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FormatViolation {
                path: "scheme.type".into(),
                pattern: SCHEME_TYPE_PATTERN.into(),
            }
        );
    }

    #[test]
    fn test_flow_requires_scopes() {
        let doc = json!({"tokenUrl": "https://example.com/token"});
        let path = Path::root().child("flows").child("password");
        let err = OAuthFlow::decode(&doc, &path).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "flows.password.available_scopes".into()
            }
        );
    }
}

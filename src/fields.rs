#![deny(missing_docs)]

//! # Field Normalization
//!
//! Generic machinery shared by every model in the crate:
//!
//! - alias-aware field lookup (`ObjectDecoder`): each field is declared at
//!   its call site as a `(canonical, alias)` pair and accepted under either
//!   spelling, with a `Conflict` error when both spellings carry different
//!   values;
//! - extension capture: every input key not claimed by a declared field is
//!   retained verbatim, in input order, under the model's `extensions` slot;
//! - naming-configurable re-encoding (`ObjectEncoder`), the exact inverse of
//!   decoding up to the canonical-vs-alias spelling choice.
//!
//! An explicit `null` for an optional field is treated as "not provided",
//! matching the source format's reference models. `null` for a required
//! field is a shape mismatch, not a missing field.

use crate::error::{DecodeError, DecodeResult, Path};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::collections::BTreeSet;

/// Unrecognized input fields retained verbatim, in input order.
pub type Extensions = IndexMap<String, Value>;

/// Which spelling re-encoding uses for aliased fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldNaming {
    /// The wire (typically camelCase) spelling, e.g. `externalDocs`.
    /// This is what documents in the wild use.
    #[default]
    Wire,
    /// The canonical (lower-case-with-separators) spelling, e.g.
    /// `external_docs`.
    Canonical,
}

/// Alias-aware reader over one raw mapping.
///
/// Declared fields are claimed as they are read; whatever remains afterwards
/// becomes the model's extensions.
pub(crate) struct ObjectDecoder<'a> {
    map: &'a Map<String, Value>,
    path: &'a Path,
    claimed: BTreeSet<&'static str>,
}

impl<'a> ObjectDecoder<'a> {
    /// Wraps a raw value, failing with `ShapeMismatch` unless it is a mapping.
    pub fn new(value: &'a Value, path: &'a Path) -> DecodeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                path,
                claimed: BTreeSet::new(),
            }),
            other => Err(DecodeError::shape(path, "mapping", other)),
        }
    }

    /// The path of the mapping itself.
    pub fn path(&self) -> &Path {
        self.path
    }

    /// The path of a field inside this mapping.
    pub fn at(&self, canonical: &str) -> Path {
        self.path.child(canonical)
    }

    /// Looks a field up under both spellings, claiming both.
    ///
    /// Explicit `null` is passed through; callers decide its meaning.
    fn lookup(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<&'a Value>> {
        self.claimed.insert(canonical);
        let primary = self.map.get(canonical);
        let secondary = match alias {
            Some(name) => {
                self.claimed.insert(name);
                self.map.get(name)
            }
            None => None,
        };

        match (primary, secondary) {
            (Some(a), Some(b)) if a != b => Err(DecodeError::conflict(
                &self.at(canonical),
                canonical,
                alias.unwrap_or(canonical),
            )),
            (Some(value), _) => Ok(Some(value)),
            (None, value) => Ok(value),
        }
    }

    /// An optional field; absent and explicit `null` both yield `None`.
    pub fn optional(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<&'a Value>> {
        Ok(self
            .lookup(canonical, alias)?
            .filter(|value| !value.is_null()))
    }

    /// A required field; absence under both spellings is
    /// `MissingRequiredField`. Explicit `null` is passed through so the
    /// typed reader reports the shape mismatch.
    pub fn required(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<&'a Value> {
        self.lookup(canonical, alias)?
            .ok_or_else(|| DecodeError::missing(&self.at(canonical)))
    }

    /// Optional string field.
    pub fn opt_str(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<String>> {
        match self.optional(canonical, alias)? {
            Some(value) => Ok(Some(expect_str(value, &self.at(canonical))?)),
            None => Ok(None),
        }
    }

    /// Required string field.
    pub fn req_str(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<String> {
        let value = self.required(canonical, alias)?;
        expect_str(value, &self.at(canonical))
    }

    /// Optional boolean field.
    pub fn opt_bool(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<bool>> {
        match self.optional(canonical, alias)? {
            Some(value) => Ok(Some(expect_bool(value, &self.at(canonical))?)),
            None => Ok(None),
        }
    }

    /// Optional numeric field, kept as an exact `serde_json::Number` so that
    /// integer and floating input re-encode without truncation.
    pub fn opt_number(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<Number>> {
        match self.optional(canonical, alias)? {
            Some(value) => Ok(Some(expect_number(value, &self.at(canonical))?)),
            None => Ok(None),
        }
    }

    /// Optional non-negative integer field (lengths, counts).
    pub fn opt_count(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<u64>> {
        match self.optional(canonical, alias)? {
            Some(value) => Ok(Some(expect_count(value, &self.at(canonical))?)),
            None => Ok(None),
        }
    }

    /// Optional field of arbitrary shape, cloned verbatim.
    pub fn opt_value(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<Value>> {
        Ok(self.optional(canonical, alias)?.cloned())
    }

    /// Optional sequence of strings.
    pub fn opt_str_list(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<Vec<String>>> {
        let Some(value) = self.optional(canonical, alias)? else {
            return Ok(None);
        };
        let path = self.at(canonical);
        let items = expect_array(value, &path)?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            out.push(expect_str(item, &path.index(i))?);
        }
        Ok(Some(out))
    }

    /// Optional sequence of arbitrary values, cloned verbatim.
    pub fn opt_value_list(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<Vec<Value>>> {
        let Some(value) = self.optional(canonical, alias)? else {
            return Ok(None);
        };
        let items = expect_array(value, &self.at(canonical))?;
        Ok(Some(items.to_vec()))
    }

    /// Optional mapping of string to string.
    pub fn opt_str_map(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<IndexMap<String, String>>> {
        let Some(value) = self.optional(canonical, alias)? else {
            return Ok(None);
        };
        let path = self.at(canonical);
        let entries = expect_object(value, &path)?;
        let mut out = IndexMap::with_capacity(entries.len());
        for (key, item) in entries {
            out.insert(key.clone(), expect_str(item, &path.child(key))?);
        }
        Ok(Some(out))
    }

    /// Optional mapping of string to arbitrary value, cloned verbatim.
    pub fn opt_value_map(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
    ) -> DecodeResult<Option<IndexMap<String, Value>>> {
        let Some(value) = self.optional(canonical, alias)? else {
            return Ok(None);
        };
        let entries = expect_object(value, &self.at(canonical))?;
        Ok(Some(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), item.clone()))
                .collect(),
        ))
    }

    /// Consumes the reader, returning every unclaimed key/value pair in
    /// input order. Together with the claimed fields this partitions the
    /// input: no key is dropped, none is bound twice.
    pub fn extensions(self) -> Extensions {
        self.map
            .iter()
            .filter(|(key, _)| !self.claimed.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Naming-configurable writer building one output mapping.
///
/// `None` fields are simply omitted, so encode∘decode reproduces the input
/// key set exactly.
pub(crate) struct ObjectEncoder {
    map: Map<String, Value>,
    naming: FieldNaming,
}

impl ObjectEncoder {
    pub fn new(naming: FieldNaming) -> Self {
        Self {
            map: Map::new(),
            naming,
        }
    }

    fn key(&self, canonical: &'static str, alias: Option<&'static str>) -> &'static str {
        match self.naming {
            FieldNaming::Wire => alias.unwrap_or(canonical),
            FieldNaming::Canonical => canonical,
        }
    }

    /// Writes a field unconditionally.
    pub fn set(&mut self, canonical: &'static str, alias: Option<&'static str>, value: Value) {
        self.map.insert(self.key(canonical, alias).to_string(), value);
    }

    /// Writes an optional raw value.
    pub fn value(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &Option<Value>) {
        if let Some(value) = value {
            self.set(canonical, alias, value.clone());
        }
    }

    /// Writes an optional string.
    pub fn str(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &Option<String>) {
        if let Some(value) = value {
            self.set(canonical, alias, Value::String(value.clone()));
        }
    }

    /// Writes a required string.
    pub fn req_str(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &str) {
        self.set(canonical, alias, Value::String(value.to_string()));
    }

    /// Writes an optional boolean.
    pub fn boolean(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &Option<bool>) {
        if let Some(value) = value {
            self.set(canonical, alias, Value::Bool(*value));
        }
    }

    /// Writes an optional number, preserving the decoded representation.
    pub fn number(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &Option<Number>) {
        if let Some(value) = value {
            self.set(canonical, alias, Value::Number(value.clone()));
        }
    }

    /// Writes an optional non-negative integer.
    pub fn count(&mut self, canonical: &'static str, alias: Option<&'static str>, value: &Option<u64>) {
        if let Some(value) = value {
            self.set(canonical, alias, Value::Number(Number::from(*value)));
        }
    }

    /// Writes an optional sequence of strings.
    pub fn str_list(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
        value: &Option<Vec<String>>,
    ) {
        if let Some(items) = value {
            let out = items.iter().cloned().map(Value::String).collect();
            self.set(canonical, alias, Value::Array(out));
        }
    }

    /// Writes an optional sequence of raw values.
    pub fn value_list(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
        value: &Option<Vec<Value>>,
    ) {
        if let Some(items) = value {
            self.set(canonical, alias, Value::Array(items.clone()));
        }
    }

    /// Writes an optional string-to-string mapping.
    pub fn str_map(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
        value: &Option<IndexMap<String, String>>,
    ) {
        if let Some(entries) = value {
            let out = entries
                .iter()
                .map(|(key, item)| (key.clone(), Value::String(item.clone())))
                .collect();
            self.set(canonical, alias, Value::Object(out));
        }
    }

    /// Writes an optional string-to-value mapping.
    pub fn value_map(
        &mut self,
        canonical: &'static str,
        alias: Option<&'static str>,
        value: &Option<IndexMap<String, Value>>,
    ) {
        if let Some(entries) = value {
            let out = entries
                .iter()
                .map(|(key, item)| (key.clone(), item.clone()))
                .collect();
            self.set(canonical, alias, Value::Object(out));
        }
    }

    /// Merges retained extensions back into the output.
    pub fn extensions(&mut self, extensions: &Extensions) {
        for (key, value) in extensions {
            self.map.insert(key.clone(), value.clone());
        }
    }

    /// Finishes the mapping.
    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

/// Expects a string scalar.
pub(crate) fn expect_str(value: &Value, path: &Path) -> DecodeResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(DecodeError::shape(path, "string", other)),
    }
}

/// Expects a boolean scalar.
pub(crate) fn expect_bool(value: &Value, path: &Path) -> DecodeResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(DecodeError::shape(path, "boolean", other)),
    }
}

/// Expects a number, integer or floating.
pub(crate) fn expect_number(value: &Value, path: &Path) -> DecodeResult<Number> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        other => Err(DecodeError::shape(path, "number", other)),
    }
}

/// Expects a non-negative integer. Floating input with a zero fractional
/// part is accepted; anything that would truncate is rejected.
pub(crate) fn expect_count(value: &Value, path: &Path) -> DecodeResult<u64> {
    if let Value::Number(number) = value {
        if let Some(n) = number.as_u64() {
            return Ok(n);
        }
        if let Some(f) = number.as_f64() {
            if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
                return Ok(f as u64);
            }
        }
    }
    Err(DecodeError::shape(path, "non-negative integer", value))
}

/// Expects a sequence.
pub(crate) fn expect_array<'v>(value: &'v Value, path: &Path) -> DecodeResult<&'v Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(DecodeError::shape(path, "sequence", other)),
    }
}

/// Expects a mapping.
pub(crate) fn expect_object<'v>(
    value: &'v Value,
    path: &Path,
) -> DecodeResult<&'v Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::shape(path, "mapping", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_alias_interchangeable() {
        let path = Path::root();
        for doc in [
            json!({"external_docs": "a"}),
            json!({"externalDocs": "a"}),
            json!({"external_docs": "a", "externalDocs": "a"}),
        ] {
            let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
            let got = fields
                .opt_str("external_docs", Some("externalDocs"))
                .unwrap();
            assert_eq!(got.as_deref(), Some("a"));
            assert!(fields.extensions().is_empty());
        }
    }

    #[test]
    fn test_alias_conflict() {
        let doc = json!({"external_docs": "a", "externalDocs": "b"});
        let path = Path::root();
        let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
        let err = fields
            .opt_str("external_docs", Some("externalDocs"))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::Conflict {
                path: "external_docs".into(),
                canonical: "external_docs".into(),
                alias: "externalDocs".into(),
            }
        );
    }

    #[test]
    fn test_extensions_capture_everything_unclaimed() {
        let doc = json!({
            "title": "T",
            "x-vendor": true,
            "totally-custom": {"nested": [1, 2]},
        });
        let path = Path::root();
        let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
        fields.opt_str("title", None).unwrap();
        let extensions = fields.extensions();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions["x-vendor"], json!(true));
        assert_eq!(extensions["totally-custom"], json!({"nested": [1, 2]}));
    }

    #[test]
    fn test_explicit_null_is_not_provided_for_optional() {
        let doc = json!({"title": null});
        let path = Path::root();
        let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
        assert_eq!(fields.opt_str("title", None).unwrap(), None);
    }

    #[test]
    fn test_explicit_null_for_required_is_shape_mismatch() {
        let doc = json!({"name": null});
        let path = Path::root();
        let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
        let err = fields.req_str("name", None).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_missing_required() {
        let doc = json!({});
        let path = Path::root().child("info");
        let mut fields = ObjectDecoder::new(&doc, &path).unwrap();
        let err = fields.req_str("version", None).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                path: "info.version".into()
            }
        );
    }

    #[test]
    fn test_count_rejects_truncation() {
        let path = Path::root();
        assert_eq!(expect_count(&json!(3), &path).unwrap(), 3);
        assert_eq!(expect_count(&json!(3.0), &path).unwrap(), 3);
        assert!(expect_count(&json!(3.5), &path).is_err());
        assert!(expect_count(&json!(-1), &path).is_err());
        assert!(expect_count(&json!("3"), &path).is_err());
    }

    #[test]
    fn test_encoder_naming_choice() {
        let mut wire = ObjectEncoder::new(FieldNaming::Wire);
        wire.str("external_docs", Some("externalDocs"), &Some("d".into()));
        assert_eq!(wire.finish(), json!({"externalDocs": "d"}));

        let mut canonical = ObjectEncoder::new(FieldNaming::Canonical);
        canonical.str("external_docs", Some("externalDocs"), &Some("d".into()));
        assert_eq!(canonical.finish(), json!({"external_docs": "d"}));
    }

    #[test]
    fn test_encoder_skips_absent_fields() {
        let mut out = ObjectEncoder::new(FieldNaming::Wire);
        out.str("title", None, &None);
        out.boolean("deprecated", None, &None);
        assert_eq!(out.finish(), json!({}));
    }
}

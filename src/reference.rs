#![deny(missing_docs)]

//! # References
//!
//! Pointer-style references (`$ref`) are accepted as opaque values and carried
//! through round trips untouched. This crate never resolves or dereferences
//! them; a resolver is an external collaborator.

use crate::error::{DecodeResult, Path};
use crate::fields::{Extensions, FieldNaming, ObjectDecoder, ObjectEncoder};
use indexmap::IndexMap;
use serde_json::Value;

/// An opaque `$ref` pointer, with any sibling keys retained verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The pointer string, e.g. `#/components/messages/lightMeasured`.
    pub ref_path: String,
    /// Sibling keys supplied next to `$ref`.
    pub extensions: Extensions,
}

impl Reference {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let ref_path = fields.req_str("$ref", None)?;
        Ok(Self {
            ref_path,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.req_str("$ref", None, &self.ref_path);
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// Either an opaque reference or an inline item.
///
/// A mapping containing a `$ref` key decodes as `Ref`; anything else is
/// handed to the item decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    /// An opaque `$ref` pointer.
    Ref(Reference),
    /// An inline item.
    Item(T),
}

impl<T> RefOr<T> {
    /// The inline item, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Ref(_) => None,
        }
    }

    /// The reference, if this is one.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Ref(reference) => Some(reference),
            Self::Item(_) => None,
        }
    }

    pub(crate) fn decode_with<F>(value: &Value, path: &Path, decode_item: F) -> DecodeResult<Self>
    where
        F: FnOnce(&Value, &Path) -> DecodeResult<T>,
    {
        if value
            .as_object()
            .is_some_and(|map| map.contains_key("$ref"))
        {
            return Ok(Self::Ref(Reference::decode(value, path)?));
        }
        Ok(Self::Item(decode_item(value, path)?))
    }

    pub(crate) fn encode_with<F>(&self, naming: FieldNaming, encode_item: F) -> Value
    where
        F: FnOnce(&T) -> Value,
    {
        match self {
            Self::Ref(reference) => reference.encode(naming),
            Self::Item(item) => encode_item(item),
        }
    }
}

/// Decodes a named mapping whose values may each be a reference or an item.
pub(crate) fn decode_ref_map<T, F>(
    value: &Value,
    path: &Path,
    decode_item: F,
) -> DecodeResult<IndexMap<String, RefOr<T>>>
where
    F: Fn(&Value, &Path) -> DecodeResult<T>,
{
    let entries = crate::fields::expect_object(value, path)?;
    let mut out = IndexMap::with_capacity(entries.len());
    for (name, entry) in entries {
        let entry_path = path.child(name);
        out.insert(
            name.clone(),
            RefOr::decode_with(entry, &entry_path, &decode_item)?,
        );
    }
    Ok(out)
}

/// Encodes a named mapping of references-or-items, preserving entry order.
pub(crate) fn encode_ref_map<T, F>(
    map: &IndexMap<String, RefOr<T>>,
    naming: FieldNaming,
    encode_item: F,
) -> Value
where
    F: Fn(&T) -> Value,
{
    let out = map
        .iter()
        .map(|(name, entry)| (name.clone(), entry.encode_with(naming, &encode_item)))
        .collect();
    Value::Object(out)
}

/// Decodes an ordered sequence whose elements may each be a reference or an
/// item.
pub(crate) fn decode_ref_list<T, F>(
    value: &Value,
    path: &Path,
    decode_item: F,
) -> DecodeResult<Vec<RefOr<T>>>
where
    F: Fn(&Value, &Path) -> DecodeResult<T>,
{
    let items = crate::fields::expect_array(value, path)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(RefOr::decode_with(item, &path.index(i), &decode_item)?);
    }
    Ok(out)
}

/// Encodes an ordered sequence of references-or-items.
pub(crate) fn encode_ref_list<T, F>(
    items: &[RefOr<T>],
    naming: FieldNaming,
    encode_item: F,
) -> Value
where
    F: Fn(&T) -> Value,
{
    Value::Array(
        items
            .iter()
            .map(|item| item.encode_with(naming, &encode_item))
            .collect(),
    )
}

/// Decodes an ordered sequence of plain references.
pub(crate) fn decode_reference_list(value: &Value, path: &Path) -> DecodeResult<Vec<Reference>> {
    let items = crate::fields::expect_array(value, path)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(Reference::decode(item, &path.index(i))?);
    }
    Ok(out)
}

/// Encodes an ordered sequence of plain references.
pub(crate) fn encode_reference_list(items: &[Reference], naming: FieldNaming) -> Value {
    Value::Array(items.iter().map(|item| item.encode(naming)).collect())
}

#![deny(missing_docs)]

//! # Schema Objects
//!
//! The recursive data-shape model at the heart of the crate. The Schema
//! Object is a superset of JSON Schema draft-07: a node may embed further
//! schemas through `properties`, `items`, the composition keywords
//! (`allOf`/`anyOf`/`oneOf`/`not`), the conditional keywords
//! (`if`/`then`/`else`) and the additional-properties/items slots, without
//! any depth bound other than the input's own.
//!
//! Nesting is guarded by an explicit counter rather than native recursion
//! limits: input deeper than `DecodeOptions::max_depth` fails with
//! `DepthExceeded` instead of overflowing the stack.
//!
//! Boolean schemas (`true` = anything permitted, `false` = nothing
//! permitted) are kept as a distinct sentinel (`SchemaRef::Bool`), never
//! silently widened into an empty object schema. Conditional subschemas are
//! stored but never evaluated.

use crate::error::{DecodeError, DecodeResult, Path};
use crate::fields::{
    expect_str, Extensions, FieldNaming, ObjectDecoder, ObjectEncoder,
};
use crate::tag::ExternalDocumentation;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Default bound on recursive schema nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for document decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested schema levels accepted before decoding
    /// fails with `DepthExceeded`.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Remaining nesting budget, threaded through every recursive decode call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Depth {
    remaining: usize,
    limit: usize,
}

impl Depth {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            remaining: limit,
            limit,
        }
    }

    fn descend(self, path: &Path) -> DecodeResult<Self> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => Ok(Self {
                remaining,
                limit: self.limit,
            }),
            None => Err(DecodeError::depth(path, self.limit)),
        }
    }
}

/// A nested schema slot: either a full schema node or one of the two
/// degenerate boolean forms.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRef {
    /// `true` permits any value; `false` permits none.
    Bool(bool),
    /// A full schema node.
    Item(Box<Schema>),
}

impl SchemaRef {
    /// Whether this slot permits arbitrary values without constraint.
    pub fn is_permissive(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// The schema node, if this slot holds one.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Item(schema) => Some(schema),
            Self::Bool(_) => None,
        }
    }

    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Object(_) => Ok(Self::Item(Box::new(Schema::decode(value, path, depth)?))),
            other => Err(DecodeError::shape(path, "mapping or boolean", other)),
        }
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Item(schema) => schema.encode(naming),
        }
    }
}

/// The declared data type of a schema: a single name or a set of names.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    /// A single type name, e.g. `"object"`.
    One(String),
    /// A set of type names, order preserved.
    Many(Vec<String>),
}

impl SchemaType {
    fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        match value {
            Value::String(name) => Ok(Self::One(name.clone())),
            Value::Array(names) => {
                let mut out = Vec::with_capacity(names.len());
                for (i, name) in names.iter().enumerate() {
                    out.push(expect_str(name, &path.index(i))?);
                }
                Ok(Self::Many(out))
            }
            other => Err(DecodeError::shape(path, "string or sequence of strings", other)),
        }
    }

    fn encode(&self) -> Value {
        match self {
            Self::One(name) => Value::String(name.clone()),
            Self::Many(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// An `items`/`contains` slot: a single schema, or an ordered tuple of
/// positional schemas. Tuple order is semantically meaningful and preserved
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaItems {
    /// One schema applied to every element.
    One(SchemaRef),
    /// Positional schemas for tuple-typed arrays.
    Tuple(Vec<SchemaRef>),
}

impl SchemaItems {
    fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(SchemaRef::decode(item, &path.index(i), depth)?);
                }
                Ok(Self::Tuple(out))
            }
            _ => Ok(Self::One(SchemaRef::decode(value, path, depth)?)),
        }
    }

    fn encode(&self, naming: FieldNaming) -> Value {
        match self {
            Self::One(schema) => schema.encode(naming),
            Self::Tuple(items) => {
                Value::Array(items.iter().map(|item| item.encode(naming)).collect())
            }
        }
    }
}

/// One node of the recursive data-shape tree.
///
/// Every nested slot is exclusively owned; reference-based sharing of
/// subtrees is the `$ref` concern this crate stores opaquely. Unrecognized
/// keywords at any node land in `extensions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// The title of the schema.
    pub title: Option<String>,
    /// The declared data type(s).
    pub schema_type: Option<SchemaType>,
    /// Required property names. An empty list is legal and vacuous.
    pub required: Option<Vec<String>>,
    /// Value must be a multiple of this number.
    pub multiple_of: Option<Number>,
    /// Inclusive upper bound.
    pub maximum: Option<Number>,
    /// Exclusive upper bound.
    pub exclusive_maximum: Option<Number>,
    /// Inclusive lower bound.
    pub minimum: Option<Number>,
    /// Exclusive lower bound.
    pub exclusive_minimum: Option<Number>,
    /// Maximum string length.
    pub max_length: Option<u64>,
    /// Minimum string length.
    pub min_length: Option<u64>,
    /// Regular expression pattern for strings.
    pub pattern: Option<String>,
    /// Maximum array length.
    pub max_items: Option<u64>,
    /// Minimum array length.
    pub min_items: Option<u64>,
    /// Whether array items must be unique.
    pub unique_items: Option<bool>,
    /// Maximum number of object properties.
    pub max_properties: Option<u64>,
    /// Minimum number of object properties.
    pub min_properties: Option<u64>,
    /// Enumeration of valid values.
    pub enum_values: Option<Vec<Value>>,
    /// Constant value.
    pub const_value: Option<Value>,
    /// Description of the schema.
    pub description: Option<String>,
    /// Format hint, e.g. `date-time`.
    pub format: Option<String>,
    /// Default value.
    pub default: Option<Value>,
    /// Example values.
    pub examples: Option<Vec<Value>>,
    /// Named object properties, order preserved.
    pub properties: Option<IndexMap<String, SchemaRef>>,
    /// Properties matched by regular expression.
    pub pattern_properties: Option<IndexMap<String, SchemaRef>>,
    /// Gate or schema for properties beyond the declared ones.
    /// Absent means additional properties are permitted.
    pub additional_properties: Option<SchemaRef>,
    /// Schema constraining property names.
    pub property_names: Option<SchemaRef>,
    /// Array item schema(s).
    pub items: Option<SchemaItems>,
    /// Gate or schema for array items beyond the tuple positions.
    pub additional_items: Option<SchemaRef>,
    /// Schema at least one array element must satisfy.
    pub contains: Option<SchemaItems>,
    /// Conjunction of schemas, order preserved for deterministic re-encoding.
    pub all_of: Option<Vec<SchemaRef>>,
    /// Disjunction of schemas.
    pub any_of: Option<Vec<SchemaRef>>,
    /// Exclusive disjunction of schemas.
    pub one_of: Option<Vec<SchemaRef>>,
    /// Negated schema.
    pub not_schema: Option<SchemaRef>,
    /// Conditional antecedent; stored, never evaluated.
    pub if_schema: Option<SchemaRef>,
    /// Conditional consequent; stored, never evaluated.
    pub then_schema: Option<SchemaRef>,
    /// Conditional alternative; stored, never evaluated.
    pub else_schema: Option<SchemaRef>,
    /// Discriminator property name.
    pub discriminator: Option<String>,
    /// Additional external documentation.
    pub external_docs: Option<ExternalDocumentation>,
    /// Whether the schema is deprecated.
    pub deprecated: Option<bool>,
    /// Read-only marker.
    pub read_only: Option<bool>,
    /// Write-only marker.
    pub write_only: Option<bool>,
    /// Unrecognized keywords, retained verbatim.
    pub extensions: Extensions,
}

impl Schema {
    /// Decodes a schema from a raw value with default options.
    pub fn from_value(value: &Value) -> DecodeResult<Self> {
        Self::from_value_with(value, &DecodeOptions::default())
    }

    /// Decodes a schema from a raw value with explicit options.
    pub fn from_value_with(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        Self::decode(value, &Path::root(), Depth::new(options.max_depth))
    }

    /// Re-encodes this schema into a raw value.
    pub fn to_value(&self, naming: FieldNaming) -> Value {
        self.encode(naming)
    }

    /// Whether properties beyond the declared ones are permitted. Absent
    /// `additionalProperties` means permitted.
    pub fn allows_additional_properties(&self) -> bool {
        !matches!(self.additional_properties, Some(SchemaRef::Bool(false)))
    }

    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let depth = depth.descend(path)?;
        let mut fields = ObjectDecoder::new(value, path)?;

        let title = fields.opt_str("title", None)?;
        let schema_type = match fields.optional("type", None)? {
            Some(value) => Some(SchemaType::decode(value, &fields.at("type"))?),
            None => None,
        };
        let required = fields.opt_str_list("required", None)?;
        let multiple_of = fields.opt_number("multiple_of", Some("multipleOf"))?;
        let maximum = fields.opt_number("maximum", None)?;
        let exclusive_maximum = fields.opt_number("exclusive_maximum", Some("exclusiveMaximum"))?;
        let minimum = fields.opt_number("minimum", None)?;
        let exclusive_minimum = fields.opt_number("exclusive_minimum", Some("exclusiveMinimum"))?;
        let max_length = fields.opt_count("max_length", Some("maxLength"))?;
        let min_length = fields.opt_count("min_length", Some("minLength"))?;
        let pattern = fields.opt_str("pattern", None)?;
        let max_items = fields.opt_count("max_items", Some("maxItems"))?;
        let min_items = fields.opt_count("min_items", Some("minItems"))?;
        let unique_items = fields.opt_bool("unique_items", Some("uniqueItems"))?;
        let max_properties = fields.opt_count("max_properties", Some("maxProperties"))?;
        let min_properties = fields.opt_count("min_properties", Some("minProperties"))?;
        let enum_values = fields.opt_value_list("enum", None)?;
        let const_value = fields.opt_value("const", None)?;
        let description = fields.opt_str("description", None)?;
        let format = fields.opt_str("format", None)?;
        let default = fields.opt_value("default", None)?;
        let examples = fields.opt_value_list("examples", None)?;

        let properties = decode_schema_map(&mut fields, "properties", None, depth)?;
        let pattern_properties =
            decode_schema_map(&mut fields, "pattern_properties", Some("patternProperties"), depth)?;
        let additional_properties = decode_schema_slot(
            &mut fields,
            "additional_properties",
            Some("additionalProperties"),
            depth,
        )?;
        let property_names =
            decode_schema_slot(&mut fields, "property_names", Some("propertyNames"), depth)?;

        let items = decode_items_slot(&mut fields, "items", None, depth)?;
        let additional_items =
            decode_schema_slot(&mut fields, "additional_items", Some("additionalItems"), depth)?;
        let contains = decode_items_slot(&mut fields, "contains", None, depth)?;

        let all_of = decode_schema_list(&mut fields, "all_of", Some("allOf"), depth)?;
        let any_of = decode_schema_list(&mut fields, "any_of", Some("anyOf"), depth)?;
        let one_of = decode_schema_list(&mut fields, "one_of", Some("oneOf"), depth)?;
        let not_schema = decode_schema_slot(&mut fields, "not_schema", Some("not"), depth)?;
        let if_schema = decode_schema_slot(&mut fields, "if_schema", Some("if"), depth)?;
        let then_schema = decode_schema_slot(&mut fields, "then_schema", Some("then"), depth)?;
        let else_schema = decode_schema_slot(&mut fields, "else_schema", Some("else"), depth)?;

        let discriminator = fields.opt_str("discriminator", None)?;
        let external_docs = match fields.optional("external_docs", Some("externalDocs"))? {
            Some(value) => Some(ExternalDocumentation::decode(
                value,
                &fields.at("external_docs"),
            )?),
            None => None,
        };
        let deprecated = fields.opt_bool("deprecated", None)?;
        let read_only = fields.opt_bool("read_only", Some("readOnly"))?;
        let write_only = fields.opt_bool("write_only", Some("writeOnly"))?;

        Ok(Self {
            title,
            schema_type,
            required,
            multiple_of,
            maximum,
            exclusive_maximum,
            minimum,
            exclusive_minimum,
            max_length,
            min_length,
            pattern,
            max_items,
            min_items,
            unique_items,
            max_properties,
            min_properties,
            enum_values,
            const_value,
            description,
            format,
            default,
            examples,
            properties,
            pattern_properties,
            additional_properties,
            property_names,
            items,
            additional_items,
            contains,
            all_of,
            any_of,
            one_of,
            not_schema,
            if_schema,
            then_schema,
            else_schema,
            discriminator,
            external_docs,
            deprecated,
            read_only,
            write_only,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);

        out.str("title", None, &self.title);
        if let Some(schema_type) = &self.schema_type {
            out.set("type", None, schema_type.encode());
        }
        out.str_list("required", None, &self.required);
        out.number("multiple_of", Some("multipleOf"), &self.multiple_of);
        out.number("maximum", None, &self.maximum);
        out.number("exclusive_maximum", Some("exclusiveMaximum"), &self.exclusive_maximum);
        out.number("minimum", None, &self.minimum);
        out.number("exclusive_minimum", Some("exclusiveMinimum"), &self.exclusive_minimum);
        out.count("max_length", Some("maxLength"), &self.max_length);
        out.count("min_length", Some("minLength"), &self.min_length);
        out.str("pattern", None, &self.pattern);
        out.count("max_items", Some("maxItems"), &self.max_items);
        out.count("min_items", Some("minItems"), &self.min_items);
        out.boolean("unique_items", Some("uniqueItems"), &self.unique_items);
        out.count("max_properties", Some("maxProperties"), &self.max_properties);
        out.count("min_properties", Some("minProperties"), &self.min_properties);
        out.value_list("enum", None, &self.enum_values);
        out.value("const", None, &self.const_value);
        out.str("description", None, &self.description);
        out.str("format", None, &self.format);
        out.value("default", None, &self.default);
        out.value_list("examples", None, &self.examples);

        encode_schema_map(&mut out, "properties", None, &self.properties, naming);
        encode_schema_map(
            &mut out,
            "pattern_properties",
            Some("patternProperties"),
            &self.pattern_properties,
            naming,
        );
        encode_schema_slot(
            &mut out,
            "additional_properties",
            Some("additionalProperties"),
            &self.additional_properties,
            naming,
        );
        encode_schema_slot(
            &mut out,
            "property_names",
            Some("propertyNames"),
            &self.property_names,
            naming,
        );
        if let Some(items) = &self.items {
            out.set("items", None, items.encode(naming));
        }
        encode_schema_slot(
            &mut out,
            "additional_items",
            Some("additionalItems"),
            &self.additional_items,
            naming,
        );
        if let Some(contains) = &self.contains {
            out.set("contains", None, contains.encode(naming));
        }
        encode_schema_list(&mut out, "all_of", Some("allOf"), &self.all_of, naming);
        encode_schema_list(&mut out, "any_of", Some("anyOf"), &self.any_of, naming);
        encode_schema_list(&mut out, "one_of", Some("oneOf"), &self.one_of, naming);
        encode_schema_slot(&mut out, "not_schema", Some("not"), &self.not_schema, naming);
        encode_schema_slot(&mut out, "if_schema", Some("if"), &self.if_schema, naming);
        encode_schema_slot(&mut out, "then_schema", Some("then"), &self.then_schema, naming);
        encode_schema_slot(&mut out, "else_schema", Some("else"), &self.else_schema, naming);

        out.str("discriminator", None, &self.discriminator);
        if let Some(docs) = &self.external_docs {
            out.set("external_docs", Some("externalDocs"), docs.encode(naming));
        }
        out.boolean("deprecated", None, &self.deprecated);
        out.boolean("read_only", Some("readOnly"), &self.read_only);
        out.boolean("write_only", Some("writeOnly"), &self.write_only);

        out.extensions(&self.extensions);
        out.finish()
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encode(FieldNaming::Wire).serialize(serializer)
    }
}

fn decode_schema_slot(
    fields: &mut ObjectDecoder<'_>,
    canonical: &'static str,
    alias: Option<&'static str>,
    depth: Depth,
) -> DecodeResult<Option<SchemaRef>> {
    match fields.optional(canonical, alias)? {
        Some(value) => Ok(Some(SchemaRef::decode(value, &fields.at(canonical), depth)?)),
        None => Ok(None),
    }
}

fn decode_items_slot(
    fields: &mut ObjectDecoder<'_>,
    canonical: &'static str,
    alias: Option<&'static str>,
    depth: Depth,
) -> DecodeResult<Option<SchemaItems>> {
    match fields.optional(canonical, alias)? {
        Some(value) => Ok(Some(SchemaItems::decode(
            value,
            &fields.at(canonical),
            depth,
        )?)),
        None => Ok(None),
    }
}

fn decode_schema_map(
    fields: &mut ObjectDecoder<'_>,
    canonical: &'static str,
    alias: Option<&'static str>,
    depth: Depth,
) -> DecodeResult<Option<IndexMap<String, SchemaRef>>> {
    let Some(value) = fields.optional(canonical, alias)? else {
        return Ok(None);
    };
    let path = fields.at(canonical);
    let entries = crate::fields::expect_object(value, &path)?;
    let mut out = IndexMap::with_capacity(entries.len());
    for (name, entry) in entries {
        out.insert(
            name.clone(),
            SchemaRef::decode(entry, &path.child(name), depth)?,
        );
    }
    Ok(Some(out))
}

fn decode_schema_list(
    fields: &mut ObjectDecoder<'_>,
    canonical: &'static str,
    alias: Option<&'static str>,
    depth: Depth,
) -> DecodeResult<Option<Vec<SchemaRef>>> {
    let Some(value) = fields.optional(canonical, alias)? else {
        return Ok(None);
    };
    let path = fields.at(canonical);
    let items = crate::fields::expect_array(value, &path)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(SchemaRef::decode(item, &path.index(i), depth)?);
    }
    Ok(Some(out))
}

fn encode_schema_slot(
    out: &mut ObjectEncoder,
    canonical: &'static str,
    alias: Option<&'static str>,
    slot: &Option<SchemaRef>,
    naming: FieldNaming,
) {
    if let Some(schema) = slot {
        out.set(canonical, alias, schema.encode(naming));
    }
}

fn encode_schema_map(
    out: &mut ObjectEncoder,
    canonical: &'static str,
    alias: Option<&'static str>,
    map: &Option<IndexMap<String, SchemaRef>>,
    naming: FieldNaming,
) {
    if let Some(entries) = map {
        let encoded = entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.encode(naming)))
            .collect();
        out.set(canonical, alias, Value::Object(encoded));
    }
}

fn encode_schema_list(
    out: &mut ObjectEncoder,
    canonical: &'static str,
    alias: Option<&'static str>,
    list: &Option<Vec<SchemaRef>>,
    naming: FieldNaming,
) {
    if let Some(items) = list {
        let encoded = items.iter().map(|item| item.encode(naming)).collect();
        out.set(canonical, alias, Value::Array(encoded));
    }
}

/// A multi-format schema definition: a format name plus the raw schema text
/// or structure in that format, kept opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiFormatSchema {
    /// Name of the schema format used by `schema`.
    pub schema_format: Option<String>,
    /// The schema definition itself, opaque to this crate.
    pub schema: Value,
    /// Unrecognized fields, retained verbatim.
    pub extensions: Extensions,
}

impl MultiFormatSchema {
    pub(crate) fn decode(value: &Value, path: &Path) -> DecodeResult<Self> {
        let mut fields = ObjectDecoder::new(value, path)?;
        let schema_format = fields.opt_str("schema_format", Some("schemaFormat"))?;
        let schema = fields.required("schema", None)?.clone();
        Ok(Self {
            schema_format,
            schema,
            extensions: fields.extensions(),
        })
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        let mut out = ObjectEncoder::new(naming);
        out.str("schema_format", Some("schemaFormat"), &self.schema_format);
        out.set("schema", None, self.schema.clone());
        out.extensions(&self.extensions);
        out.finish()
    }
}

/// A payload/headers definition: either a plain schema (including the
/// boolean forms) or a multi-format wrapper.
///
/// A mapping carrying a `schemaFormat` key is the multi-format form;
/// everything else is a Schema Object.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadSchema {
    /// A plain Schema Object or boolean schema.
    Schema(SchemaRef),
    /// A multi-format schema wrapper.
    MultiFormat(MultiFormatSchema),
}

impl PayloadSchema {
    /// The schema slot, if this is the plain form.
    pub fn as_schema(&self) -> Option<&SchemaRef> {
        match self {
            Self::Schema(schema) => Some(schema),
            Self::MultiFormat(_) => None,
        }
    }

    pub(crate) fn decode(value: &Value, path: &Path, depth: Depth) -> DecodeResult<Self> {
        let is_multi_format = value.as_object().is_some_and(|map| {
            map.contains_key("schemaFormat") || map.contains_key("schema_format")
        });
        if is_multi_format {
            return Ok(Self::MultiFormat(MultiFormatSchema::decode(value, path)?));
        }
        Ok(Self::Schema(SchemaRef::decode(value, path, depth)?))
    }

    pub(crate) fn encode(&self, naming: FieldNaming) -> Value {
        match self {
            Self::Schema(schema) => schema.encode(naming),
            Self::MultiFormat(multi) => multi.encode(naming),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nested_properties(levels: usize) -> Value {
        let mut schema = json!({"type": "string"});
        for _ in 1..levels {
            schema = json!({"type": "object", "properties": {"a": schema}});
        }
        schema
    }

    #[test]
    fn test_basic_object_schema() {
        let doc = json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "additionalProperties": false,
        });
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::One("object".into())));
        let a = schema.properties.as_ref().unwrap()["a"]
            .as_schema()
            .unwrap();
        assert_eq!(a.schema_type, Some(SchemaType::One("string".into())));
        // A boolean gate stays the sentinel, not an empty schema node.
        assert_eq!(schema.additional_properties, Some(SchemaRef::Bool(false)));
        assert!(!schema.allows_additional_properties());
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_boolean_schema_true_is_permissive() {
        let doc = json!({"additionalProperties": true});
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.additional_properties, Some(SchemaRef::Bool(true)));
        assert!(schema
            .additional_properties
            .as_ref()
            .unwrap()
            .is_permissive());
        assert!(schema.allows_additional_properties());
    }

    #[test]
    fn test_absent_additional_properties_is_permitted() {
        let schema = Schema::from_value(&json!({"type": "object"})).unwrap();
        assert_eq!(schema.additional_properties, None);
        assert!(schema.allows_additional_properties());
    }

    #[test]
    fn test_tuple_items_preserve_order() {
        let doc = json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}, true],
        });
        let schema = Schema::from_value(&doc).unwrap();
        let Some(SchemaItems::Tuple(items)) = &schema.items else {
            panic!("expected tuple items");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].as_schema().unwrap().schema_type,
            Some(SchemaType::One("string".into()))
        );
        assert_eq!(items[2], SchemaRef::Bool(true));
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_composition_and_conditionals_roundtrip() {
        let doc = json!({
            "allOf": [{"type": "object"}, {"required": ["id"]}],
            "oneOf": [{"type": "string"}],
            "not": {"type": "null"},
            "if": {"properties": {"kind": {"const": "a"}}},
            "then": {"required": ["a"]},
            "else": {"required": ["b"]},
        });
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.all_of.as_ref().unwrap().len(), 2);
        assert!(schema.if_schema.is_some());
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
        // Canonical naming renames the keyword slots.
        let canonical = schema.to_value(FieldNaming::Canonical);
        assert!(canonical.get("not_schema").is_some());
        assert!(canonical.get("if_schema").is_some());
    }

    #[test]
    fn test_numeric_bounds_keep_exact_representation() {
        let doc = json!({
            "minimum": 0,
            "maximum": 99.5,
            "multipleOf": 0.01,
            "minLength": 2,
        });
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.min_length, Some(2));
        // Integer input re-encodes as an integer, float as float.
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_alias_and_canonical_names_accepted() {
        let wire = json!({"maxLength": 5, "readOnly": true});
        let canonical = json!({"max_length": 5, "read_only": true});
        let a = Schema::from_value(&wire).unwrap();
        let b = Schema::from_value(&canonical).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alias_conflict_detected() {
        let doc = json!({"maxLength": 5, "max_length": 6});
        let err = Schema::from_value(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Conflict {
                path: "max_length".into(),
                canonical: "max_length".into(),
                alias: "maxLength".into(),
            }
        );
    }

    #[test]
    fn test_vendor_keywords_preserved() {
        let doc = json!({
            "type": "string",
            "x-vendor-flag": true,
            "customKeyword": {"anything": [1, null]},
        });
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.extensions["x-vendor-flag"], json!(true));
        assert_eq!(schema.extensions.len(), 2);
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_malformed_properties_path() {
        let doc = json!({"properties": {"user": {"items": 3}}});
        let err = Schema::from_value(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                path: "properties.user.items".into(),
                expected: "mapping or boolean".into(),
                actual: "number".into(),
            }
        );
    }

    #[test]
    fn test_properties_must_be_mapping() {
        let doc = json!({"properties": [1, 2]});
        let err = Schema::from_value(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                path: "properties".into(),
                expected: "mapping".into(),
                actual: "sequence".into(),
            }
        );
    }

    #[test]
    fn test_depth_limit_enforced() {
        let options = DecodeOptions { max_depth: 8 };
        let ok = nested_properties(8);
        assert!(Schema::from_value_with(&ok, &options).is_ok());

        let too_deep = nested_properties(9);
        let err = Schema::from_value_with(&too_deep, &options).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DepthExceeded { limit: 8, .. }
        ));
    }

    #[test]
    fn test_default_depth_accepts_realistic_nesting() {
        let doc = nested_properties(64);
        assert!(Schema::from_value(&doc).is_ok());
    }

    #[test]
    fn test_empty_sequences_are_vacuous() {
        let doc = json!({"required": [], "enum": [], "allOf": []});
        let schema = Schema::from_value(&doc).unwrap();
        assert_eq!(schema.required, Some(vec![]));
        assert_eq!(schema.enum_values, Some(vec![]));
        assert_eq!(schema.all_of, Some(vec![]));
        assert_eq!(schema.to_value(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_multi_format_payload() {
        let doc = json!({
            "schemaFormat": "application/vnd.apache.avro;version=1.9.0",
            "schema": {"type": "record", "name": "User", "fields": []},
        });
        let path = Path::root();
        let payload = PayloadSchema::decode(&doc, &path, Depth::new(8)).unwrap();
        let PayloadSchema::MultiFormat(multi) = &payload else {
            panic!("expected multi-format");
        };
        assert_eq!(
            multi.schema_format.as_deref(),
            Some("application/vnd.apache.avro;version=1.9.0")
        );
        assert_eq!(payload.encode(FieldNaming::Wire), doc);
    }

    #[test]
    fn test_schema_serializes_with_wire_names() {
        let schema = Schema::from_value(&json!({"read_only": true})).unwrap();
        let serialized = serde_json::to_value(&schema).unwrap();
        assert_eq!(serialized, json!({"readOnly": true}));
    }
}

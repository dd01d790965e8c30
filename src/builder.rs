//! Recursive type builder: schema records → built records with `db` tags.
//!
//! Structure-preserving: the built record has the same field count and
//! order as its source. Scalar fields keep their declared type and gain
//! the converted tag; nested record fields recurse first and carry no tag
//! of their own.

use convert_case::{Case, Casing};
use serde_json::Value;

use crate::schema::{FieldType, RecordType};
use crate::tag::{StructTag, convert_tag};

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRecord {
    pub name: String,
    pub fields: Vec<BuiltField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltField {
    pub name: String,
    pub ty: BuiltType,
    pub tag: Option<StructTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuiltType {
    Scalar(String),
    Record(BuiltRecord),
}

/// Build the converted record for `source`, named `name`.
///
/// Never fails: a nested record with zero fields simply builds a
/// degenerate empty record.
pub fn build_record(source: &RecordType, name: &str) -> BuiltRecord {
    let fields = source
        .fields
        .iter()
        .map(|field| match &field.ty {
            FieldType::Record(nested) => BuiltField {
                name: field.name.clone(),
                // the field name doubles as the nested type name
                ty: BuiltType::Record(build_record(nested, &field.name.to_case(Case::UpperCamel))),
                tag: None,
            },
            FieldType::Scalar(scalar) => BuiltField {
                name: field.name.clone(),
                ty: BuiltType::Scalar(scalar.clone()),
                tag: Some(convert_tag(field.tag.as_ref())),
            },
        })
        .collect();
    BuiltRecord {
        name: name.to_string(),
        fields,
    }
}

impl BuiltRecord {
    /// A zero-valued instance of the built type.
    ///
    /// Used only for the diagnostic summary confirming the type assembled;
    /// nothing downstream consumes it.
    pub fn zero_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        for field in &self.fields {
            object.insert(field.name.clone(), field.ty.zero_value());
        }
        Value::Object(object)
    }
}

impl BuiltType {
    fn zero_value(&self) -> Value {
        match self {
            Self::Record(record) => record.zero_value(),
            Self::Scalar(scalar) => match scalar.as_str() {
                "int" | "uint" => Value::from(0),
                "float" => Value::from(0.0),
                "string" => Value::from(""),
                "bool" => Value::from(false),
                _ => Value::Null,
            },
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

//! External schema descriptors: the input data model.
//!
//! A schema file is a JSON document declaring named record types. Field
//! order is meaningful and preserved end to end (the registry is an
//! `IndexMap`, fields are a `Vec`), so repeated runs over the same file
//! produce byte-identical output.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tag::StructTag;

/// A schema file: named record types in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub types: IndexMap<String, RecordType>,
}

/// An ordered sequence of field descriptors. May appear nested as a
/// field's type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordType {
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Raw metadata tag; absent tags degrade to empty values downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<StructTag>,
}

/// Either a scalar type name (`"int"`, `"string"`, or a literal Rust type)
/// or an inline nested record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Scalar(String),
    Record(RecordType),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema declares no type named `{0}`")]
    UnknownType(String),
}

impl Schema {
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| SchemaError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Select record types by name. An empty filter selects every type.
    ///
    /// Survivors keep schema declaration order regardless of filter order;
    /// a name the schema does not declare is an error, not a silent skip.
    pub fn select<'a>(
        &'a self,
        names: &[String],
    ) -> Result<Vec<(&'a str, &'a RecordType)>, SchemaError> {
        for name in names {
            if !self.types.contains_key(name) {
                return Err(SchemaError::UnknownType(name.clone()));
            }
        }
        Ok(self
            .types
            .iter()
            .filter(|(name, _)| names.is_empty() || names.iter().any(|n| n == *name))
            .map(|(name, record)| (name.as_str(), record))
            .collect())
    }
}

// ------------------------------- Tests ------------------------------------ //

//! Rust source emission for built records.
//!
//! `Codegen` accumulates plain text, one declaration per record (nested
//! records surface as their own named structs, depth-first under the
//! parent), then formats the whole buffer in one pass. Formatting is
//! best-effort: if the buffer does not parse, the raw text is emitted so
//! the user can inspect what went wrong.

use std::fmt::Write as _;

use crate::builder::{BuiltField, BuiltRecord, BuiltType};

/// Map a schema scalar name onto the Rust type it declares.
///
/// Unrecognized names pass through unchanged, so a schema may name
/// concrete Rust types directly.
pub fn rust_type(scalar: &str) -> &str {
    match scalar {
        "int" => "i64",
        "uint" => "u64",
        "float" => "f64",
        "string" => "String",
        "bool" => "bool",
        other => other,
    }
}

pub struct Codegen {
    buf: String, // accumulated output
}

impl Codegen {
    pub fn new() -> Self {
        let mut buf = String::new();
        // inner doc survives formatting; plain `//` comments would not
        buf.push_str("//! Generated by `dbstruct`. Do not edit by hand.\n\n");
        Self { buf }
    }

    /// Emit `record` and, after it, one declaration per nested record.
    pub fn emit(&mut self, record: &BuiltRecord) {
        let _ = writeln!(self.buf, "#[derive(Debug, Clone)]");
        let _ = writeln!(self.buf, "pub struct {} {{", record.name);
        for field in &record.fields {
            self.emit_field(field);
        }
        let _ = writeln!(self.buf, "}}");
        for field in &record.fields {
            if let BuiltType::Record(nested) = &field.ty {
                self.emit(nested);
            }
        }
    }

    // one field line: tag attribute (if any), name, type
    fn emit_field(&mut self, field: &BuiltField) {
        if let Some(tag) = &field.tag {
            for (key, value) in tag.pairs() {
                let _ = writeln!(self.buf, "    #[{key}({value:?})]");
            }
        }
        let ty = match &field.ty {
            BuiltType::Scalar(scalar) => rust_type(scalar),
            BuiltType::Record(nested) => nested.name.as_str(),
        };
        let _ = writeln!(self.buf, "    pub {}: {},", field.name, ty);
    }

    /// The raw accumulated buffer, unformatted.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Format the accumulated source.
    ///
    /// On parse failure the raw buffer is returned and a warning is
    /// logged; the run carries on.
    pub fn into_formatted(self) -> String {
        match syn::parse_file(&self.buf) {
            Ok(file) => prettyplease::unparse(&file),
            Err(err) => {
                log::warn!("generated Rust does not parse ({err}); emitting unformatted source");
                self.buf
            }
        }
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_record;
    use crate::schema::RecordType;

    fn build(json: &str, name: &str) -> BuiltRecord {
        let record: RecordType = serde_json::from_str(json).unwrap();
        build_record(&record, name)
    }

    const TWO_FIELDS: &str = r#"{ "fields": [
      { "name": "field1", "type": "int", "tag": "json:\"field1,omitempty\"" },
      { "name": "field2", "type": "string", "tag": "json:\"field2,omitempty\"" }
    ] }"#;

    #[test]
    fn two_field_example_emits_both_lines_in_order() {
        let mut cg = Codegen::new();
        cg.emit(&build(TWO_FIELDS, "DynamicStruct"));
        let src = cg.into_formatted();
        assert!(src.contains("pub struct DynamicStruct"));
        let field1 = src.find(r#"#[db("field1,omitempty")]"#).unwrap();
        let field2 = src.find(r#"#[db("field2,omitempty")]"#).unwrap();
        assert!(field1 < field2);
        assert!(src.contains("pub field1: i64"));
        assert!(src.contains("pub field2: String"));
    }

    #[test]
    fn formatted_output_parses_as_rust() {
        let mut cg = Codegen::new();
        cg.emit(&build(TWO_FIELDS, "DynamicStruct"));
        let src = cg.into_formatted();
        assert!(syn::parse_file(&src).is_ok());
    }

    #[test]
    fn identical_input_renders_byte_identical_output() {
        let render = || {
            let mut cg = Codegen::new();
            cg.emit(&build(TWO_FIELDS, "DynamicStruct"));
            cg.into_formatted()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn nested_record_declares_a_nested_struct() {
        let mut cg = Codegen::new();
        cg.emit(&build(
            r#"{ "fields": [
              { "name": "child",
                "type": { "fields": [
                  { "name": "field3", "type": "int", "tag": "json:\"field3,omitempty\"" }
                ] } }
            ] }"#,
            "Parent",
        ));
        let src = cg.into_formatted();
        assert!(src.contains("pub struct Parent"));
        assert!(src.contains("pub child: Child"));
        assert!(src.contains("pub struct Child"));
        assert!(src.contains(r#"#[db("field3,omitempty")]"#));
    }

    #[test]
    fn unknown_scalar_names_pass_through() {
        let mut cg = Codegen::new();
        cg.emit(&build(
            r#"{ "fields": [ { "name": "when", "type": "chrono::NaiveDate" } ] }"#,
            "T",
        ));
        let src = cg.into_formatted();
        assert!(src.contains("pub when: chrono::NaiveDate"));
    }

    #[test]
    fn empty_tag_value_still_emits_the_attribute() {
        let mut cg = Codegen::new();
        cg.emit(&build(
            r#"{ "fields": [ { "name": "bare", "type": "int" } ] }"#,
            "T",
        ));
        let src = cg.into_formatted();
        assert!(src.contains(r#"#[db("")]"#));
    }

    #[test]
    fn unparseable_buffer_falls_back_to_raw_text() {
        // a field named by a Rust keyword does not parse
        let mut cg = Codegen::new();
        cg.emit(&build(
            r#"{ "fields": [ { "name": "struct", "type": "int" } ] }"#,
            "T",
        ));
        let raw = {
            let mut cg2 = Codegen::new();
            cg2.emit(&build(
                r#"{ "fields": [ { "name": "struct", "type": "int" } ] }"#,
                "T",
            ));
            cg2.into_string()
        };
        assert_eq!(cg.into_formatted(), raw);
    }
}

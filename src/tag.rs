//! Struct tag strings: space-separated `key:"value"` pairs.
//!
//! This is the tool's own metadata grammar for schema fields, e.g.
//! `json:"field1,omitempty" xml:"f1"`. Lookup is by key; the value is
//! everything between the quotes, verbatim (modifiers like `,omitempty`
//! are part of the value, not interpreted here).

use serde::{Deserialize, Serialize};

/// A field's raw metadata tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructTag(String);

impl StructTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the `key:"value"` pairs in declaration order.
    ///
    /// Malformed trailing input (a key with no quoted value) silently ends
    /// the iteration; there is no error path by design.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs { rest: self.0.trim_start() }
    }

    /// The value associated with `key`, or `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

impl std::fmt::Display for StructTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct Pairs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        // key runs up to the `:"` that opens the quoted value
        let colon = self.rest.find(":\"")?;
        let key = self.rest[..colon].trim();
        let tail = &self.rest[colon + 2..];
        // value runs to the next quote; no escaping is recognized
        let end = tail.find('"')?;
        let value = &tail[..end];
        self.rest = tail[end + 1..].trim_start();
        Some((key, value))
    }
}

/// Rewrite a field tag from the `json` key into a `db` tag.
///
/// The extracted value is embedded verbatim. A missing tag or a missing
/// `json` key degrades to an empty value rather than an error.
pub fn convert_tag(tag: Option<&StructTag>) -> StructTag {
    let value = tag.and_then(|t| t.get("json")).unwrap_or("");
    StructTag::new(format!("db:\"{value}\""))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_value_verbatim() {
        let tag = StructTag::new(r#"json:"field1,omitempty""#);
        assert_eq!(tag.get("json"), Some("field1,omitempty"));
    }

    #[test]
    fn get_picks_the_right_key_among_many() {
        let tag = StructTag::new(r#"json:"name" xml:"n" db:"other""#);
        assert_eq!(tag.get("xml"), Some("n"));
        assert_eq!(tag.get("db"), Some("other"));
        assert_eq!(tag.get("json"), Some("name"));
    }

    #[test]
    fn get_on_absent_key_is_none() {
        let tag = StructTag::new(r#"xml:"f1""#);
        assert_eq!(tag.get("json"), None);
    }

    #[test]
    fn empty_value_is_kept_distinct_from_absent_key() {
        let tag = StructTag::new(r#"json:"""#);
        assert_eq!(tag.get("json"), Some(""));
    }

    #[test]
    fn convert_embeds_the_json_value_verbatim() {
        let tag = StructTag::new(r#"json:"field1,omitempty""#);
        assert_eq!(convert_tag(Some(&tag)).as_str(), r#"db:"field1,omitempty""#);
    }

    #[test]
    fn convert_without_json_key_emits_empty_value() {
        let tag = StructTag::new(r#"xml:"f1""#);
        assert_eq!(convert_tag(Some(&tag)).as_str(), r#"db:"""#);
        assert_eq!(convert_tag(None).as_str(), r#"db:"""#);
    }

    #[test]
    fn pairs_iterate_in_declaration_order() {
        let tag = StructTag::new(r#"a:"1" b:"2" c:"3""#);
        let pairs: Vec<_> = tag.pairs().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn malformed_tail_ends_iteration_quietly() {
        let tag = StructTag::new(r#"a:"1" dangling"#);
        let pairs: Vec<_> = tag.pairs().collect();
        assert_eq!(pairs, vec![("a", "1")]);
    }
}

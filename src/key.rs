//! Resolution of a record field's external key.
//!
//! The key is what users write in configuration documents and what shows up
//! in error paths. Serialization key annotations are consulted in a fixed
//! order; without one, the field identifier is converted to snake case.

use crate::record::FieldDescriptor;
use heck::ToSnakeCase;

/// Key annotations in the order they are consulted.
pub const KEY_ANNOTATIONS: [&str; 3] = ["yaml", "toml", "json"];

/// Annotation value that never names a key.
const SKIP_SENTINEL: &str = "-";

/// Resolve the external key of a field.
pub fn resolve(field: &FieldDescriptor) -> String {
    KEY_ANNOTATIONS
        .iter()
        .filter_map(|annotation| field.key_annotation(annotation))
        .find(|value| !value.is_empty() && *value != SKIP_SENTINEL)
        .map(|value| value.split(',').next().unwrap_or(value).to_string())
        .unwrap_or_else(|| snake_case(field.ident()))
}

/// Snake-case an identifier, dropping a raw identifier prefix.
pub fn snake_case(ident: &str) -> String {
    ident.trim_start_matches("r#").to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_snake_case() {
        assert_eq!(resolve(&FieldDescriptor::new("listen_addr")), "listen_addr");
        assert_eq!(resolve(&FieldDescriptor::new("ListenAddr")), "listen_addr");
        assert_eq!(resolve(&FieldDescriptor::new("HTTPServer")), "http_server");
        assert_eq!(resolve(&FieldDescriptor::new("A")), "a");
    }

    #[test]
    fn test_raw_identifier_prefix_removed() {
        assert_eq!(resolve(&FieldDescriptor::new("r#type")), "type");
    }

    #[test]
    fn test_modifiers_after_comma_ignored() {
        let field = FieldDescriptor::new("a").yaml("blah,omitempty");
        assert_eq!(resolve(&field), "blah");
    }

    #[test]
    fn test_yaml_wins_over_toml_and_json() {
        let field = FieldDescriptor::new("a")
            .json("from_json")
            .toml("from_toml")
            .yaml("from_yaml");
        assert_eq!(resolve(&field), "from_yaml");
    }

    #[test]
    fn test_toml_wins_over_json() {
        let field = FieldDescriptor::new("a").json("from_json").toml("from_toml");
        assert_eq!(resolve(&field), "from_toml");
    }

    #[test]
    fn test_empty_and_sentinel_annotations_skipped() {
        let field = FieldDescriptor::new("SomeField")
            .yaml("-")
            .toml("")
            .json("from_json");
        assert_eq!(resolve(&field), "from_json");

        let field = FieldDescriptor::new("SomeField").yaml("-");
        assert_eq!(resolve(&field), "some_field");
    }

    #[test]
    fn test_leading_comma_gives_empty_key() {
        let field = FieldDescriptor::new("a").json(",omitempty");
        assert_eq!(resolve(&field), "");
    }
}

//! Documentation of a record type's configuration fields.
//!
//! Walks the default value of a record type and lists every leaf field with
//! its dotted path, type, default literal, environment variable and required
//! flag. Nested records are flattened into their parent's path; optional
//! records are listed as a single leaf since their default is `None`.
//! Render the result with [`crate::format::render`].

use crate::path::TreePath;
use crate::record::Record;
use crate::value::Shape;
use serde::Serialize;

/// One documented configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    /// Rust identifier of the field.
    pub name: String,
    /// Short type name, e.g. `Option<bool>`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Dotted path of resolved keys.
    pub path: String,
    /// The `default` literal, empty when there is none.
    pub default_value: String,
    /// The `env` variable name, empty when there is none.
    pub env: String,
    pub required: bool,
}

/// Document every field of `T`.
pub fn describe<T: Record + Default>() -> Vec<FieldDoc> {
    let mut root = T::default();
    let mut docs = Vec::new();
    collect(&mut root, &TreePath::root(), &mut docs);
    docs
}

fn collect(record: &mut dyn Record, path: &TreePath, docs: &mut Vec<FieldDoc>) {
    for field in record.fields() {
        if field.is_skipped() {
            continue;
        }

        let field_path = path.key(field.key());
        let Some(value) = record.field_mut(field.ident()) else {
            continue;
        };

        let (value, _) = value.follow_mut();
        let type_name = short_type_name(value.type_name());

        match value.shape() {
            Shape::Record(nested) => collect(nested, &field_path, docs),
            _ => docs.push(FieldDoc {
                name: field.ident().trim_start_matches("r#").to_string(),
                type_name,
                path: field_path.to_string(),
                default_value: field.default_value().unwrap_or_default().to_string(),
                env: field.env_var().unwrap_or_default().to_string(),
                required: field.is_required(),
            }),
        }
    }
}

/// Strip module paths from a type name: `alloc::vec::Vec<my::Item>` becomes
/// `Vec<Item>`.
pub fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut token = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            token.push(ch);
        } else {
            push_last_segment(&mut short, &token);
            token.clear();
            short.push(ch);
        }
    }
    push_last_segment(&mut short, &token);

    short
}

fn push_last_segment(short: &mut String, token: &str) {
    short.push_str(token.rsplit("::").next().unwrap_or(token));
}

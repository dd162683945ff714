//! Records: structs whose fields carry reconciliation annotations.
//!
//! Rust has no run-time reflection over struct fields, so a record describes
//! itself through the [`Record`] trait. The [`crate::record!`] macro writes
//! that implementation from a compact field list whose annotation names
//! mirror the builder methods on [`FieldDescriptor`].

use crate::key;
use crate::value::Value;

/// Static description of one record field and its annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    ident: &'static str,
    yaml: Option<&'static str>,
    toml: Option<&'static str>,
    json: Option<&'static str>,
    default: Option<&'static str>,
    required: bool,
    env: Option<&'static str>,
    skip: bool,
}

impl FieldDescriptor {
    /// Describe the field with the given Rust identifier and no annotations.
    pub fn new(ident: &'static str) -> Self {
        Self {
            ident,
            yaml: None,
            toml: None,
            json: None,
            default: None,
            required: false,
            env: None,
            skip: false,
        }
    }

    /// YAML key annotation, e.g. `"listen,omitempty"`.
    pub fn yaml(mut self, tag: &'static str) -> Self {
        self.yaml = Some(tag);
        self
    }

    /// TOML key annotation.
    pub fn toml(mut self, tag: &'static str) -> Self {
        self.toml = Some(tag);
        self
    }

    /// JSON key annotation.
    pub fn json(mut self, tag: &'static str) -> Self {
        self.json = Some(tag);
        self
    }

    /// Literal decoded into the field when it is absent.
    pub fn default(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    /// Require a value when the enclosing record is itself required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Environment variable consulted when the field is absent.
    pub fn env(mut self, name: &'static str) -> Self {
        self.env = Some(name);
        self
    }

    /// Hide the field from reconciliation.
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Raw value of a key annotation (`yaml`, `toml` or `json`).
    pub fn key_annotation(&self, annotation: &str) -> Option<&'static str> {
        match annotation {
            "yaml" => self.yaml,
            "toml" => self.toml,
            "json" => self.json,
            _ => None,
        }
    }

    /// Resolved external key, see [`key::resolve`].
    pub fn key(&self) -> String {
        key::resolve(self)
    }

    /// The default literal; an empty annotation counts as no default.
    pub fn default_value(&self) -> Option<&'static str> {
        self.default.filter(|text| !text.is_empty())
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The environment variable name; an empty annotation counts as none.
    pub fn env_var(&self) -> Option<&'static str> {
        self.env.filter(|name| !name.is_empty())
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }
}

/// A struct whose fields take part in reconciliation.
pub trait Record {
    /// Descriptors of the participating fields, in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Mutable handle to the field with the given identifier.
    fn field_mut(&mut self, ident: &str) -> Option<&mut dyn Value>;
}

/// Implement [`Record`] and [`Value`] for a struct.
///
/// Each listed field may carry annotations in brackets; a bare name is an
/// annotation (`required`, `skip`), a `name = "text"` pair sets a value
/// (`default`, `env`, `yaml`, `toml`, `json`). Fields that are not listed
/// are invisible to reconciliation.
///
/// The struct must implement `Default`, `PartialEq` and `DeserializeOwned`,
/// and every listed field must implement [`Value`].
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(default)]
/// struct Server {
///     host: String,
///     port: u16,
///     token: String,
/// }
///
/// ko::record!(Server {
///     host [default = "localhost"],
///     port [default = "8080", env = "SERVER_PORT"],
///     token [required, env = "SERVER_TOKEN"],
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($name:ty { $($field:ident $([$($tag:ident $(= $value:literal)?),* $(,)?])?),* $(,)? }) => {
        impl $crate::Record for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor::new(::std::stringify!($field))
                            $($(.$tag($($value)?))*)?
                    ),*
                ]
            }

            fn field_mut(
                &mut self,
                ident: &str,
            ) -> ::std::option::Option<&mut dyn $crate::Value> {
                $(
                    if ident == ::std::stringify!($field) {
                        let field = &mut self.$field as &mut dyn $crate::Value;
                        return ::std::option::Option::Some(field);
                    }
                )*
                ::std::option::Option::None
            }
        }

        impl $crate::Value for $name {
            fn is_absent(&self) -> bool {
                *self == <$name as ::std::default::Default>::default()
            }

            fn assign(
                &mut self,
                text: &str,
            ) -> ::std::result::Result<(), $crate::decode::LiteralError> {
                *self = $crate::decode::literal(text)?;
                ::std::result::Result::Ok(())
            }

            fn shape(&mut self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self as &mut dyn $crate::Record)
            }

            fn follow_mut(&mut self) -> (&mut dyn $crate::Value, bool) {
                (self as &mut dyn $crate::Value, false)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Listener {
        address: String,
        port: u16,
        hidden: bool,
        internal: bool,
    }

    crate::record!(Listener {
        address [yaml = "addr,omitempty", required],
        port [default = "8080", env = "LISTEN_PORT"],
        hidden [skip],
    });

    #[test]
    fn test_builder_sets_annotations() {
        let field = FieldDescriptor::new("port")
            .default("8080")
            .env("PORT")
            .required();
        assert_eq!(field.default_value(), Some("8080"));
        assert_eq!(field.env_var(), Some("PORT"));
        assert!(field.is_required());
        assert!(!field.is_skipped());
    }

    #[test]
    fn test_empty_default_and_env_count_as_missing() {
        let field = FieldDescriptor::new("bar").default("").env("");
        assert_eq!(field.default_value(), None);
        assert_eq!(field.env_var(), None);
    }

    #[test]
    fn test_macro_lists_fields_in_order() {
        let listener = Listener::default();
        let fields = listener.fields();
        let idents: Vec<_> = fields.iter().map(FieldDescriptor::ident).collect();
        assert_eq!(idents, ["address", "port", "hidden"]);

        assert_eq!(fields[0].key(), "addr");
        assert!(fields[0].is_required());
        assert_eq!(fields[1].default_value(), Some("8080"));
        assert_eq!(fields[1].env_var(), Some("LISTEN_PORT"));
        assert!(fields[2].is_skipped());
    }

    #[test]
    fn test_macro_field_access() {
        let mut listener = Listener::default();
        listener
            .field_mut("port")
            .expect("port is declared")
            .assign("9000")
            .unwrap();
        assert_eq!(listener.port, 9000);
        assert!(listener.field_mut("internal").is_none());
    }

    #[test]
    fn test_record_value_absence() {
        let mut listener = Listener::default();
        assert!(listener.is_absent());
        listener.port = 1;
        assert!(!listener.is_absent());
        assert_eq!(listener.shape().describe(), "record");
    }
}

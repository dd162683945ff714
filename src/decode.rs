//! Decoding of the short literals carried by `default` and `env` annotations.
//!
//! Literals are parsed as YAML documents, so `8080` becomes an integer,
//! `[a, b]` a sequence and `{host: x}` a record, depending on the type they
//! are decoded into.

use serde::de::DeserializeOwned;

/// Error produced when a literal does not fit the destination type.
pub type LiteralError = serde_yaml::Error;

/// Parse `text` into a value of type `T`.
pub fn literal<T: DeserializeOwned>(text: &str) -> Result<T, LiteralError> {
    serde_yaml::from_str(text)
}

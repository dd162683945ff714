//! Typed configuration loading with environment overrides, defaults and
//! required fields.
//!
//! A configuration file is decoded into a target value with serde, then the
//! target is walked field by field. Each field of a [`Record`] may carry:
//!
//! - a key (`yaml`, `toml`, `json` tags, else the snake-cased identifier)
//! - `env = "VAR"`: the variable's value overrides an absent field
//! - `default = "literal"`: applied when the field is still absent
//! - `required`: an absent field without default is an error
//! - `skip`: never visited
//!
//! Literals and environment values are parsed as YAML, so `"5"`, `"true"`,
//! `"[1, 2]"` and `"{x: true}"` all work for the matching field types.
//!
//! ```no_run
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, PartialEq, Deserialize)]
//! #[serde(default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     token: String,
//! }
//!
//! ko::record!(Server {
//!     host [default = "localhost"],
//!     port [default = "8080", env = "SERVER_PORT"],
//!     token [required, env = "SERVER_TOKEN"],
//! });
//!
//! let mut server = Server::default();
//! ko::load("server.toml", &mut server)?;
//! # Ok::<(), ko::ConfigError>(())
//! ```

pub mod decode;
pub mod docs;
pub mod env;
pub mod error;
pub mod format;
pub mod key;
pub mod loader;
pub mod path;
pub mod reconcile;
pub mod record;
pub mod value;

pub use docs::{FieldDoc, describe};
pub use env::{Environment, MockEnv, ProcessEnv};
pub use error::{ConfigError, ConfigResult, ErrorCode, LiteralOrigin};
pub use format::OutputFormat;
pub use loader::{Format, Loader, Unmarshaller, load};
pub use path::{Segment, TreePath};
pub use reconcile::{Reconciler, reconcile, reconcile_with};
pub use record::{FieldDescriptor, Record};
pub use value::{Shape, Value};

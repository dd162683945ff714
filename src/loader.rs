//! Loading a configuration file into a typed target.
//!
//! [`Loader`] reads the file, decodes it into the target with the selected
//! decoder (TOML unless told otherwise), then reconciles the result: env
//! overrides, defaults and required fields. [`load`] is the shorthand for the
//! default options.

use crate::env::{Environment, ProcessEnv};
use crate::error::{ConfigError, ConfigResult};
use crate::reconcile;
use crate::value::Value;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Custom decoder for raw file contents.
pub type Unmarshaller<T> = Box<dyn Fn(&[u8]) -> anyhow::Result<T>>;

/// Built-in document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Decode a whole document.
    ///
    /// Returns `None` for a document without keys: a null document, an empty
    /// mapping, or one holding only comments.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> anyhow::Result<Option<T>> {
        match self {
            Format::Toml => {
                let table: toml::Table = toml::from_str(std::str::from_utf8(bytes)?)?;
                if table.is_empty() {
                    return Ok(None);
                }
                Ok(Some(toml::Value::Table(table).try_into()?))
            }
            Format::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
                match &value {
                    serde_yaml::Value::Null => Ok(None),
                    serde_yaml::Value::Mapping(mapping) if mapping.is_empty() => Ok(None),
                    _ => Ok(Some(serde_yaml::from_value(value)?)),
                }
            }
            Format::Json => {
                let value: serde_json::Value = serde_json::from_slice(bytes)?;
                match &value {
                    serde_json::Value::Null => Ok(None),
                    serde_json::Value::Object(object) if object.is_empty() => Ok(None),
                    _ => Ok(Some(serde_json::from_value(value)?)),
                }
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => write!(f, "toml"),
            Format::Yaml => write!(f, "yaml"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Configuration loader with builder-style options.
///
/// # Example
///
/// ```no_run
/// use ko::{Format, Loader, MockEnv};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(default)]
/// struct Config {
///     listen: String,
/// }
///
/// ko::record!(Config { listen [default = "0.0.0.0:8080", env = "LISTEN"] });
///
/// let mut config = Config::default();
/// Loader::new()
///     .format(Format::Yaml)
///     .require_file(false)
///     .env(MockEnv::from([("LISTEN", "127.0.0.1:9000")]))
///     .load("config.yaml", &mut config)?;
/// # Ok::<(), ko::ConfigError>(())
/// ```
pub struct Loader<T> {
    /// Custom decoder, takes precedence over `format`
    unmarshaller: Option<Unmarshaller<T>>,
    /// Built-in decoder used without a custom one
    format: Format,
    /// Whether a missing file is an error
    require_file: bool,
    /// Source for `env` annotations
    env: Box<dyn Environment>,
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self {
            unmarshaller: None,
            format: Format::default(),
            require_file: true,
            env: Box::new(ProcessEnv),
        }
    }

    /// Decode file contents with a custom function.
    pub fn unmarshaller(
        mut self,
        unmarshaller: impl Fn(&[u8]) -> anyhow::Result<T> + 'static,
    ) -> Self {
        self.unmarshaller = Some(Box::new(unmarshaller));
        self
    }

    /// Decode file contents with a built-in format.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// When `false`, a missing file is tolerated and only env overrides and
    /// defaults are applied to the target.
    pub fn require_file(mut self, require_file: bool) -> Self {
        self.require_file = require_file;
        self
    }

    /// Resolve `env` annotations through `env` instead of the process
    /// environment.
    pub fn env(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }
}

impl<T: Value + DeserializeOwned> Loader<T> {
    /// Load `path` into `target` and reconcile it.
    ///
    /// A document without keys (blank, comments only, null or an empty
    /// mapping) leaves `target` as it was before reconciliation, as does a
    /// tolerated missing file. Any other document replaces `target` whole:
    /// fields it does not mention take their `Default` values, not the
    /// values `target` held before. A custom unmarshaller is skipped only for
    /// blank documents.
    pub fn load(&self, path: impl AsRef<Path>, target: &mut T) -> ConfigResult<()> {
        let path = path.as_ref();

        match std::fs::read(path) {
            Ok(bytes) => self.decode_into(path, &bytes, target)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !self.require_file => {
                debug!(path = %path.display(), "Config file not found, applying defaults only");
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        debug!(path = %path.display(), "Reconciling configuration");
        reconcile::reconcile_with(target, self.env.as_ref())
    }

    fn decode_into(&self, path: &Path, bytes: &[u8], target: &mut T) -> ConfigResult<()> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %path.display(), "Config file is blank, skipping decode");
            return Ok(());
        }

        let decoded = match &self.unmarshaller {
            Some(unmarshaller) => unmarshaller(bytes).map(Some),
            None => {
                debug!(path = %path.display(), format = %self.format, "Decoding config file");
                self.format.decode(bytes)
            }
        };

        let decoded = decoded.map_err(|source| ConfigError::Unmarshal {
            path: path.to_path_buf(),
            source,
        })?;
        match decoded {
            Some(decoded) => *target = decoded,
            None => debug!(path = %path.display(), "Config file has no keys, keeping target"),
        }
        Ok(())
    }
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("custom_unmarshaller", &self.unmarshaller.is_some())
            .field("format", &self.format)
            .field("require_file", &self.require_file)
            .finish_non_exhaustive()
    }
}

/// Load a TOML file into `target` and reconcile it against the process
/// environment. The file must exist.
pub fn load<T: Value + DeserializeOwned>(
    path: impl AsRef<Path>,
    target: &mut T,
) -> ConfigResult<()> {
    Loader::new().load(path, target)
}

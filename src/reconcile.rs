//! Recursive reconciliation of a decoded configuration tree.
//!
//! A single depth-first pass that, for every record field in declaration
//! order, applies an environment override to absent fields, descends into
//! nested records, applies the `default` literal to fields that are still
//! absent and enforces `required`, then descends into records held in
//! sequences and maps.
//!
//! Required-ness is scoped to one level: a field's own `required` flag is
//! enforced only when the record holding it was itself declared required
//! (or is the root). It does not accumulate over ancestors.
//!
//! Mutation only happens through addressable locations. A record stored by
//! value in a map is walked, but any attempt to default or override one of
//! its fields fails with [`ConfigError::NotAddressable`]; store the record
//! behind `Option` or `Box` to allow it. Records nested by value inside such
//! an entry are not descended into.
//!
//! The walk stops at the first failure. Fields changed before that point keep
//! their new values.

use crate::env::{Environment, ProcessEnv};
use crate::error::{ConfigError, ConfigResult, LiteralOrigin};
use crate::path::TreePath;
use crate::record::{FieldDescriptor, Record};
use crate::value::{Shape, Value};

/// Reconcile `root` against the real process environment.
pub fn reconcile(root: &mut dyn Value) -> ConfigResult<()> {
    reconcile_with(root, &ProcessEnv)
}

/// Reconcile `root`, resolving `env` annotations through `env`.
pub fn reconcile_with(root: &mut dyn Value, env: &dyn Environment) -> ConfigResult<()> {
    Reconciler::new(env).walk(root, true, &TreePath::root())
}

/// The reconciliation walk, bound to an environment.
pub struct Reconciler<'e> {
    env: &'e dyn Environment,
}

impl<'e> Reconciler<'e> {
    pub fn new(env: &'e dyn Environment) -> Self {
        Self { env }
    }

    /// Reconcile `node`, found at `path`, under the given required context.
    ///
    /// Maps are accepted as-is, sequences are walked element by element and
    /// records field by field. Anything else is a shape mismatch.
    pub fn walk(
        &self,
        node: &mut dyn Value,
        required: bool,
        path: &TreePath,
    ) -> ConfigResult<()> {
        self.walk_node(node, required, true, path)
    }

    fn walk_node(
        &self,
        node: &mut dyn Value,
        required: bool,
        addressable: bool,
        path: &TreePath,
    ) -> ConfigResult<()> {
        let (node, through_pointer) = node.follow_mut();
        let addressable = addressable || through_pointer;

        match node.shape() {
            Shape::Map(_) => Ok(()),
            Shape::Sequence(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    self.walk_node(item, required, true, &path.index(index))
                        .map_err(|source| ConfigError::InvalidItem {
                            index,
                            source: Box::new(source),
                        })?;
                }
                Ok(())
            }
            Shape::Record(record) => self.walk_record(record, required, addressable, path),
            other => Err(ConfigError::ShapeMismatch {
                field: path.clone(),
                found: other.describe(),
            }),
        }
    }

    fn walk_record(
        &self,
        record: &mut dyn Record,
        required: bool,
        addressable: bool,
        path: &TreePath,
    ) -> ConfigResult<()> {
        for field in record.fields() {
            if field.is_skipped() {
                continue;
            }

            let field_path = path.key(field.key());
            let value = record
                .field_mut(field.ident())
                .ok_or_else(|| ConfigError::ShapeMismatch {
                    field: field_path.clone(),
                    found: "undeclared field",
                })?;

            self.reconcile_field(&field, value, required, addressable, &field_path)?;
        }

        Ok(())
    }

    fn reconcile_field(
        &self,
        field: &FieldDescriptor,
        value: &mut dyn Value,
        required: bool,
        addressable: bool,
        path: &TreePath,
    ) -> ConfigResult<()> {
        let field_required = field.is_required();

        if value.is_absent() {
            if let Some(name) = field.env_var() {
                if let Some(text) = self.env.var(name).filter(|text| !text.is_empty()) {
                    assign(value, addressable, &text, LiteralOrigin::Env(name.to_string()), path)?;
                }
            }
        }

        let (value, through_pointer) = value.follow_mut();
        let addressable = addressable || through_pointer;

        if addressable {
            if let Shape::Record(nested) = value.shape() {
                self.walk_record(nested, field_required, true, path)?;
            }
        }

        if value.is_absent() {
            if let Some(text) = field.default_value() {
                assign(value, addressable, text, LiteralOrigin::Default, path)?;
            } else if required && field_required {
                return Err(ConfigError::RequiredFieldMissing {
                    field: path.clone(),
                    env: field.env_var().map(str::to_string),
                });
            }
        }

        match value.shape() {
            Shape::Sequence(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    let (item, _) = item.follow_mut();
                    if let Shape::Record(nested) = item.shape() {
                        self.walk_record(nested, field_required, true, &path.index(index))?;
                    }
                }
            }
            // First failing entry in the map's own iteration order wins.
            Shape::Map(entries) => {
                for (key, entry) in entries {
                    let (entry, through_pointer) = entry.follow_mut();
                    if let Shape::Record(nested) = entry.shape() {
                        let entry_path = path.map_key(key);
                        self.walk_record(nested, field_required, through_pointer, &entry_path)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn assign(
    value: &mut dyn Value,
    addressable: bool,
    text: &str,
    origin: LiteralOrigin,
    path: &TreePath,
) -> ConfigResult<()> {
    if !addressable {
        return Err(ConfigError::NotAddressable {
            field: path.clone(),
        });
    }

    value.assign(text).map_err(|source| ConfigError::Decode {
        origin,
        field: path.clone(),
        text: text.to_string(),
        source,
    })
}

//! The value model walked by the reconciler.
//!
//! Every type that can appear in a configuration tree implements [`Value`],
//! which exposes the one thing the reconciler needs to dispatch on: its
//! [`Shape`]. Scalars, `Option`, `Box`, `Vec` and string-keyed maps are
//! covered here; records get their implementation from [`crate::record!`],
//! and custom leaf types (enums, newtypes) from [`crate::scalar!`].
//!
//! An empty `Vec` or map is absent, so `ports = []` in a document still
//! receives the field's default and fails a `required` check. Wrap the
//! collection in `Option` to keep an explicitly empty one: `Some(vec![])` is
//! present, only `None` is absent.

use crate::decode::{self, LiteralError};
use crate::record::Record;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// A node of a configuration tree.
pub trait Value {
    /// Whether the value equals the zero value of its type.
    fn is_absent(&self) -> bool;

    /// Replace the value with `text` decoded as a YAML literal.
    fn assign(&mut self, text: &str) -> Result<(), LiteralError>;

    /// Mutable view of the value's structure.
    fn shape(&mut self) -> Shape<'_>;

    /// Follow present pointer layers down to the innermost value.
    ///
    /// Returns the innermost value and whether at least one pointer was
    /// crossed. A `None` layer stops the walk and is itself returned.
    fn follow_mut(&mut self) -> (&mut dyn Value, bool);

    /// Fully qualified name of the concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Structure of a [`Value`], with mutable handles to its children.
pub enum Shape<'a> {
    Scalar,
    Record(&'a mut dyn Record),
    Sequence(Vec<&'a mut dyn Value>),
    Map(Vec<(String, &'a mut dyn Value)>),
    /// An optional or boxed value; `None` when the pointer is null.
    Pointer(Option<&'a mut dyn Value>),
}

impl Shape<'_> {
    /// Short name of the shape for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Record(_) => "record",
            Shape::Sequence(_) => "sequence",
            Shape::Map(_) => "map",
            Shape::Pointer(Some(_)) => "pointer",
            Shape::Pointer(None) => "null pointer",
        }
    }
}

/// Implement [`Value`] for leaf types.
///
/// The type must implement `Default`, `PartialEq` and `DeserializeOwned`;
/// it is absent when it equals its default.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(rename_all = "snake_case")]
/// enum Mode {
///     #[default]
///     Relative,
///     Absolute,
/// }
///
/// ko::scalar!(Mode);
/// ```
#[macro_export]
macro_rules! scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Value for $ty {
                fn is_absent(&self) -> bool {
                    *self == <$ty as ::std::default::Default>::default()
                }

                fn assign(
                    &mut self,
                    text: &str,
                ) -> ::std::result::Result<(), $crate::decode::LiteralError> {
                    *self = $crate::decode::literal(text)?;
                    ::std::result::Result::Ok(())
                }

                fn shape(&mut self) -> $crate::Shape<'_> {
                    $crate::Shape::Scalar
                }

                fn follow_mut(&mut self) -> (&mut dyn $crate::Value, bool) {
                    (self as &mut dyn $crate::Value, false)
                }
            }
        )*
    };
}

scalar!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    PathBuf,
);

impl<T: Value + DeserializeOwned> Value for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        *self = Some(decode::literal(text)?);
        Ok(())
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Pointer(self.as_mut().map(|inner| inner as &mut dyn Value))
    }

    fn follow_mut(&mut self) -> (&mut dyn Value, bool) {
        match self {
            Some(inner) => (inner.follow_mut().0, true),
            none @ None => (none as &mut dyn Value, false),
        }
    }
}

// A box is a pointer that is never null, so it is never absent itself.
impl<T: Value + DeserializeOwned> Value for Box<T> {
    fn is_absent(&self) -> bool {
        false
    }

    fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        **self = decode::literal(text)?;
        Ok(())
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Pointer(Some(&mut **self as &mut dyn Value))
    }

    fn follow_mut(&mut self) -> (&mut dyn Value, bool) {
        ((**self).follow_mut().0, true)
    }
}

// Empty is absent, matching a missing key after decoding.
impl<T: Value + DeserializeOwned> Value for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        *self = decode::literal(text)?;
        Ok(())
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self.iter_mut().map(|item| item as &mut dyn Value).collect())
    }

    fn follow_mut(&mut self) -> (&mut dyn Value, bool) {
        (self as &mut dyn Value, false)
    }
}

impl<T: Value + DeserializeOwned> Value for HashMap<String, T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        *self = decode::literal(text)?;
        Ok(())
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(
            self.iter_mut()
                .map(|(key, entry)| (key.clone(), entry as &mut dyn Value))
                .collect(),
        )
    }

    fn follow_mut(&mut self) -> (&mut dyn Value, bool) {
        (self as &mut dyn Value, false)
    }
}

impl<T: Value + DeserializeOwned> Value for BTreeMap<String, T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        *self = decode::literal(text)?;
        Ok(())
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(
            self.iter_mut()
                .map(|(key, entry)| (key.clone(), entry as &mut dyn Value))
                .collect(),
        )
    }

    fn follow_mut(&mut self) -> (&mut dyn Value, bool) {
        (self as &mut dyn Value, false)
    }
}

//! Field handles and the [`EnvField`] trait
//!
//! Every type that can appear as a field of a `#[derive(Tenv)]` record
//! implements [`EnvField`]. The trait answers three questions for the
//! inspector: where a converted value should be written
//! ([`EnvField::bind_target`]), how to build an empty instance when an
//! optional nested record is absent ([`EnvField::materialize`]), and which
//! fields a record exposes ([`EnvField::bindings`]).
//!
//! Scalars hand out a typed [`FieldRef`]. Composite types (sequences,
//! mappings, nested records bound by value) hand out
//! [`FieldRef::Unsupported`] and are left untouched by the binder. Field
//! types with no `EnvField` implementation at all are bound the same way by
//! the derive.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use crate::error::TenvError;
use crate::inspect::Binding;

/// A type that can be the target of an environment binding.
///
/// Records get an implementation from `#[derive(Tenv)]`. Implementations for
/// scalars, `Option<T>`, `Box<T>` and common collections are provided here.
pub trait EnvField {
    /// Mutable handle to the innermost location of this value.
    ///
    /// Absent optional records are materialized along the way.
    fn bind_target(&mut self) -> FieldRef<'_> {
        FieldRef::Unsupported
    }

    /// An empty instance, when `Self` is a record or wraps one.
    fn materialize() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    /// Binding descriptors for each settable field, in declaration order.
    ///
    /// `None` means `Self` is not a record.
    fn bindings(&mut self) -> Option<Vec<Binding<'_>>> {
        None
    }

    /// Build a default instance and populate it from the process environment.
    fn from_env() -> Result<Self, TenvError>
    where
        Self: Default + Sized,
    {
        let mut record = Self::default();
        crate::populate_from_env(&mut record)?;
        Ok(record)
    }
}

/// Mutable handle to a field location, tagged with its scalar kind.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Text(&'a mut String),
    Int(IntRef<'a>),
    Uint(UintRef<'a>),
    Bool(&'a mut bool),
    Float(FloatRef<'a>),
    /// Anything without a text conversion; assignment is a no-op.
    Unsupported,
}

/// Signed integer location of a specific width.
#[derive(Debug)]
pub enum IntRef<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
}

/// Unsigned integer location of a specific width.
#[derive(Debug)]
pub enum UintRef<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
}

/// Floating point location of a specific width.
#[derive(Debug)]
pub enum FloatRef<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FieldRef<'_> {
    /// Short name of the kind, reported as `kind` in tracing events.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldRef::Text(_) => "text",
            FieldRef::Int(_) => "int",
            FieldRef::Uint(_) => "uint",
            FieldRef::Bool(_) => "bool",
            FieldRef::Float(_) => "float",
            FieldRef::Unsupported => "unsupported",
        }
    }

    /// Whether assigning through this handle can change the field.
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldRef::Unsupported)
    }
}

impl<'a> From<&'a mut String> for FieldRef<'a> {
    fn from(slot: &'a mut String) -> Self {
        FieldRef::Text(slot)
    }
}

impl<'a> From<&'a mut bool> for FieldRef<'a> {
    fn from(slot: &'a mut bool) -> Self {
        FieldRef::Bool(slot)
    }
}

impl EnvField for String {
    fn bind_target(&mut self) -> FieldRef<'_> {
        FieldRef::from(self)
    }
}

impl EnvField for bool {
    fn bind_target(&mut self) -> FieldRef<'_> {
        FieldRef::from(self)
    }
}

macro_rules! numeric_fields {
    ($kind:ident($handle:ident) { $($ty:ty => $variant:ident),* $(,)? }) => {$(
        impl<'a> From<&'a mut $ty> for FieldRef<'a> {
            fn from(slot: &'a mut $ty) -> Self {
                FieldRef::$kind($handle::$variant(slot))
            }
        }

        impl EnvField for $ty {
            fn bind_target(&mut self) -> FieldRef<'_> {
                FieldRef::from(self)
            }
        }
    )*};
}

numeric_fields!(Int(IntRef) {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
});

numeric_fields!(Uint(UintRef) {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
});

numeric_fields!(Float(FloatRef) {
    f32 => F32,
    f64 => F64,
});

impl<T: EnvField> EnvField for Option<T> {
    fn bind_target(&mut self) -> FieldRef<'_> {
        if self.is_none() {
            *self = T::materialize();
        }
        match self {
            Some(inner) => inner.bind_target(),
            // Absent and not a record: nothing to point at.
            None => FieldRef::Unsupported,
        }
    }

    fn materialize() -> Option<Self> {
        T::materialize().map(Some)
    }
}

impl<T: EnvField> EnvField for Box<T> {
    fn bind_target(&mut self) -> FieldRef<'_> {
        (**self).bind_target()
    }

    fn materialize() -> Option<Self> {
        T::materialize().map(Box::new)
    }
}

impl EnvField for char {}
impl EnvField for PathBuf {}
impl<T> EnvField for Vec<T> {}
impl<T> EnvField for VecDeque<T> {}
impl<T, S> EnvField for HashSet<T, S> {}
impl<T> EnvField for BTreeSet<T> {}
impl<K, V, S> EnvField for HashMap<K, V, S> {}
impl<K, V> EnvField for BTreeMap<K, V> {}

//! Support code for `#[derive(Tenv)]` expansions. Not public API.
//!
//! Generated code binds each field through a [`Slot`]. Method resolution on
//! `(&Slot::new(&mut field)).__tenv_bind()` picks [`BindEnvField`] when the
//! field type implements [`EnvField`], and otherwise auto-refs once more and
//! lands on [`BindUnsupported`]. Field types without a conversion therefore
//! compile and bind as [`FieldRef::Unsupported`].

use std::cell::Cell;

use crate::field::{EnvField, FieldRef};

/// A field location waiting to be turned into a [`FieldRef`].
pub struct Slot<'a, T>(Cell<Option<&'a mut T>>);

impl<'a, T> Slot<'a, T> {
    pub fn new(field: &'a mut T) -> Self {
        Self(Cell::new(Some(field)))
    }
}

pub trait BindEnvField<'a> {
    fn __tenv_bind(&self) -> FieldRef<'a>;
}

impl<'a, T: EnvField> BindEnvField<'a> for Slot<'a, T> {
    fn __tenv_bind(&self) -> FieldRef<'a> {
        match self.0.take() {
            Some(field) => field.bind_target(),
            None => FieldRef::Unsupported,
        }
    }
}

pub trait BindUnsupported<'a> {
    fn __tenv_bind(&self) -> FieldRef<'a>;
}

impl<'a, T> BindUnsupported<'a> for &Slot<'a, T> {
    fn __tenv_bind(&self) -> FieldRef<'a> {
        FieldRef::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_env_field_types_get_a_handle() {
        let mut port = 0u16;
        let target = (&Slot::new(&mut port)).__tenv_bind();
        assert_eq!(target.kind(), "uint");
    }

    #[test]
    fn test_other_types_are_unsupported() {
        let mut timeout = Duration::from_secs(5);
        let target = (&Slot::new(&mut timeout)).__tenv_bind();
        assert!(!target.is_supported());
        assert_eq!(timeout, Duration::from_secs(5));
    }
}

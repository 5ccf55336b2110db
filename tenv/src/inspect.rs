//! Field inspection: turning a record into binding descriptors

use crate::error::TenvError;
use crate::field::{EnvField, FieldRef};

/// One settable field of a record, with the key it is looked up under.
///
/// Descriptors borrow the record mutably and live only for the duration of a
/// single populate call.
#[derive(Debug)]
pub struct Binding<'a> {
    /// Declared name of the field
    pub field_name: &'static str,
    /// Upper-cased override key from `#[tenv(name = "...")]`, or empty
    pub alt_key: String,
    /// Key actually used for lookup: `alt_key` if non-empty, else the field name
    pub resolved_key: String,
    /// Whether `{resolved_key}_FILE` is consulted when the variable is unset
    pub from_file: bool,
    /// Handle to the innermost field location
    pub field_ref: FieldRef<'a>,
}

impl<'a> Binding<'a> {
    /// Create a descriptor for `field_name`, overridden by `tag` when non-empty.
    ///
    /// Both keys are upper-cased. Used by `#[derive(Tenv)]` generated code and
    /// by hand-written [`EnvField::bindings`] implementations, which must not
    /// pass an empty `field_name`.
    pub fn new(field_name: &'static str, tag: &str, field_ref: FieldRef<'a>) -> Self {
        let alt_key = tag.to_uppercase();
        let resolved_key = if alt_key.is_empty() {
            field_name.to_uppercase()
        } else {
            alt_key.clone()
        };
        debug_assert!(
            !resolved_key.is_empty(),
            "binding needs a non-empty field name or override key"
        );

        Self {
            field_name,
            alt_key,
            resolved_key,
            from_file: false,
            field_ref,
        }
    }

    /// Enable the `{KEY}_FILE` fallback for this field.
    pub fn with_file_fallback(mut self) -> Self {
        self.from_file = true;
        self
    }
}

/// Collect binding descriptors for every settable field of `record`.
///
/// Absent optional nested records are replaced with default instances as a
/// side effect; scalar values are never touched.
///
/// # Errors
///
/// [`TenvError::InvalidSpecification`] if `record` has no field table.
pub fn collect_field_info<T>(record: &mut T) -> Result<Vec<Binding<'_>>, TenvError>
where
    T: EnvField + ?Sized,
{
    record.bindings().ok_or(TenvError::InvalidSpecification)
}

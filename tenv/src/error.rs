//! Error types for populating records from environment variables

/// Errors returned by [`populate_from_env`](crate::populate_from_env) and
/// [`collect_field_info`](crate::collect_field_info).
///
/// Missing or empty environment variables are never errors; the field simply
/// keeps its current value.
#[derive(Debug, thiserror::Error)]
pub enum TenvError {
    /// The target is not a record.
    ///
    /// Occurs when a plain scalar, an `Option`, or any other value without a
    /// field table is passed where a record is expected. No field is touched.
    #[error("specification must be a mutable reference to a record")]
    InvalidSpecification,

    /// A present, non-empty value could not be converted to the field's type.
    ///
    /// Fields bound before the failing one keep their new values.
    #[error("error processing field {field}: {source}")]
    Field {
        /// Declared name of the field being bound
        field: String,
        /// The underlying conversion failure
        source: ConversionError,
    },

    /// Failed to read the file named by a `{KEY}_FILE` environment variable.
    ///
    /// Only fields marked `#[tenv(from_file)]` consult `{KEY}_FILE`.
    #[error("Failed to read file '{path}' for environment variable '{name}': {source}")]
    FileRead {
        /// Name of the `{KEY}_FILE` environment variable (e.g., "API_KEY_FILE")
        name: String,
        /// Path to the file that failed to be read
        path: String,
        /// Underlying I/O error that caused the failure
        source: std::io::Error,
    },
}

impl TenvError {
    /// The conversion failure behind a [`TenvError::Field`], if any.
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            Self::Field { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn field(field: impl Into<String>, source: ConversionError) -> Self {
        Self::Field {
            field: field.into(),
            source,
        }
    }
}

/// A text value that does not parse as the target scalar type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Not a valid signed integer, or out of range for the target width.
    #[error("invalid value for int ({type_name}): {value}")]
    InvalidInt {
        value: String,
        type_name: &'static str,
    },

    /// Not a valid unsigned integer, negative, or out of range.
    #[error("invalid value for uint ({type_name}): {value}")]
    InvalidUint {
        value: String,
        type_name: &'static str,
    },

    /// Not one of `1`, `t`, `true`, `0`, `f`, `false`.
    #[error("invalid value for bool: {value}")]
    InvalidBool { value: String },

    /// Not a valid float, or a finite literal that overflows the target width.
    #[error("invalid value for float ({type_name}): {value}")]
    InvalidFloat {
        value: String,
        type_name: &'static str,
    },
}

impl ConversionError {
    pub(crate) fn int<T>(value: &str) -> Self {
        Self::InvalidInt {
            value: value.to_string(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn uint<T>(value: &str) -> Self {
        Self::InvalidUint {
            value: value.to_string(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn bool(value: &str) -> Self {
        Self::InvalidBool {
            value: value.to_string(),
        }
    }

    pub(crate) fn float<T>(value: &str) -> Self {
        Self::InvalidFloat {
            value: value.to_string(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

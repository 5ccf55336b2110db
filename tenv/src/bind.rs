//! Environment binding: resolving and assigning each descriptor's value

use crate::convert::convert_and_set_field;
use crate::error::TenvError;
use crate::field::EnvField;
use crate::inspect::{collect_field_info, Binding};
use crate::source::{read_file_value, EnvSource, ProcessEnv};

/// Populate `record` from the process environment.
///
/// Each settable field is looked up under its resolved key. Unset or empty
/// variables leave the field unchanged. The first conversion failure stops
/// the pass; fields bound before it keep their new values.
///
/// # Errors
///
/// - [`TenvError::InvalidSpecification`] if `record` has no field table
/// - [`TenvError::Field`] if a value cannot be converted to its field's type
/// - [`TenvError::FileRead`] if a `{KEY}_FILE` secret cannot be read
pub fn populate_from_env<T>(record: &mut T) -> Result<(), TenvError>
where
    T: EnvField + ?Sized,
{
    populate_from_source(record, &ProcessEnv)
}

/// Populate `record` from an arbitrary [`EnvSource`].
///
/// Same semantics as [`populate_from_env`].
pub fn populate_from_source<T, S>(record: &mut T, source: &S) -> Result<(), TenvError>
where
    T: EnvField + ?Sized,
    S: EnvSource + ?Sized,
{
    for binding in collect_field_info(record)? {
        let Some(value) = resolve(&binding, source)? else {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                field = binding.field_name,
                key = %binding.resolved_key,
                "environment variable unset or empty, keeping current value"
            );
            continue;
        };

        let field_name = binding.field_name;
        #[cfg(feature = "tracing")]
        let kind = binding.field_ref.kind();
        #[cfg(feature = "tracing")]
        if !binding.field_ref.is_supported() {
            tracing::trace!(field = field_name, kind, "field has no text conversion, leaving unchanged");
        }

        if let Err(e) = convert_and_set_field(&value, binding.field_ref) {
            #[cfg(feature = "tracing")]
            tracing::debug!(field = field_name, kind, error = %e, "failed to convert environment value");
            return Err(TenvError::field(field_name, e));
        }
    }

    Ok(())
}

/// Find the value for one descriptor; `None` means skip the field.
fn resolve<S>(binding: &Binding<'_>, source: &S) -> Result<Option<String>, TenvError>
where
    S: EnvSource + ?Sized,
{
    let mut value = source.lookup(&binding.resolved_key);

    // When an override is present it already is the resolved key, so this
    // repeats the first lookup. Kept as a separate step.
    if value.is_none() && !binding.alt_key.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::trace!(key = %binding.alt_key, "retrying lookup with override key");
        value = source.lookup(&binding.alt_key);
    }

    if value.is_none() && binding.from_file {
        value = read_file_value(source, &binding.resolved_key)?;
    }

    Ok(value.filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use std::collections::HashMap;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Config {
        host: String,
        port: i32,
        debug: bool,
        log_level: String,
    }

    impl EnvField for Config {
        fn bindings(&mut self) -> Option<Vec<Binding<'_>>> {
            Some(vec![
                Binding::new("host", "HOST", self.host.bind_target()),
                Binding::new("port", "PORT", self.port.bind_target()),
                Binding::new("debug", "DEBUG", self.debug.bind_target()),
                Binding::new("log_level", "log_level", self.log_level.bind_target()),
            ])
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_populate_all_fields() {
        let source = env(&[
            ("HOST", "localhost"),
            ("PORT", "8080"),
            ("DEBUG", "true"),
            ("LOG_LEVEL", "info"),
        ]);
        let mut config = Config::default();
        populate_from_source(&mut config, &source).unwrap();

        assert_eq!(
            config,
            Config {
                host: "localhost".into(),
                port: 8080,
                debug: true,
                log_level: "info".into(),
            }
        );
    }

    #[test]
    fn test_missing_and_empty_values_are_skipped() {
        let source = env(&[("HOST", ""), ("PORT", "9000")]);
        let mut config = Config {
            host: "keep".into(),
            debug: true,
            ..Config::default()
        };
        populate_from_source(&mut config, &source).unwrap();

        assert_eq!(config.host, "keep");
        assert_eq!(config.port, 9000);
        assert!(config.debug);
    }

    #[test]
    fn test_failure_stops_at_failing_field() {
        let source = env(&[
            ("HOST", "example.com"),
            ("PORT", "abc"),
            ("DEBUG", "true"),
            ("LOG_LEVEL", "warn"),
        ]);
        let mut config = Config::default();
        let err = populate_from_source(&mut config, &source).unwrap_err();

        match err {
            TenvError::Field { field, source } => {
                assert_eq!(field, "port");
                assert!(matches!(source, ConversionError::InvalidInt { .. }));
            }
            other => panic!("expected Field error, got {other:?}"),
        }
        assert_eq!(config.host, "example.com");
        assert_eq!(config.port, 0);
        assert!(!config.debug);
        assert_eq!(config.log_level, "");
    }

    #[test]
    fn test_populate_is_idempotent() {
        let source = env(&[("HOST", "a"), ("PORT", "1"), ("LOG_LEVEL", "debug")]);
        let mut config = Config::default();
        populate_from_source(&mut config, &source).unwrap();
        let first = config.clone();
        populate_from_source(&mut config, &source).unwrap();

        assert_eq!(config, first);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_lowercase_variable_is_not_found() {
        let source = env(&[("log_level", "info")]);
        let mut config = Config::default();
        populate_from_source(&mut config, &source).unwrap();
        assert_eq!(config.log_level, "");
    }

    #[test]
    fn test_override_key_is_looked_up_twice() {
        use std::cell::RefCell;

        #[derive(Default)]
        struct RecordingSource {
            asked: RefCell<Vec<String>>,
        }

        impl EnvSource for RecordingSource {
            fn lookup(&self, key: &str) -> Option<String> {
                self.asked.borrow_mut().push(key.to_string());
                None
            }
        }

        #[derive(Default)]
        struct Levels {
            level: String,
            verbose: bool,
        }

        impl EnvField for Levels {
            fn bindings(&mut self) -> Option<Vec<Binding<'_>>> {
                Some(vec![
                    Binding::new("level", "log_level", self.level.bind_target()),
                    Binding::new("verbose", "", self.verbose.bind_target()),
                ])
            }
        }

        let source = RecordingSource::default();
        let mut levels = Levels::default();
        populate_from_source(&mut levels, &source).unwrap();

        assert_eq!(
            source.asked.into_inner(),
            ["LOG_LEVEL", "LOG_LEVEL", "VERBOSE"]
        );
        assert_eq!(levels.level, "");
        assert!(!levels.verbose);
    }

    #[test]
    fn test_non_record_is_rejected_without_mutation() {
        let source = env(&[("PORT", "1")]);
        let mut port = 42i32;
        assert!(matches!(
            populate_from_source(&mut port, &source),
            Err(TenvError::InvalidSpecification)
        ));
        assert_eq!(port, 42);
    }
}

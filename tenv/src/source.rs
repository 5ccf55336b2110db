//! Environment sources
//!
//! The binder reads through [`EnvSource`] so that callers and tests can supply
//! a lookup table instead of the process environment.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;

use crate::error::TenvError;

/// A read-only table of environment variables.
///
/// Keys are matched exactly as stored; no case folding is applied.
pub trait EnvSource {
    /// Value of `key`, or `None` when it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Values that are not valid Unicode are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var_os(key)?.into_string().ok()
    }
}

impl<S: std::hash::BuildHasher> EnvSource for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Read the secret file named by `{key}_FILE`, if that variable is set.
///
/// The file content is trimmed of surrounding whitespace.
pub(crate) fn read_file_value<S>(source: &S, key: &str) -> Result<Option<String>, TenvError>
where
    S: EnvSource + ?Sized,
{
    let file_var_name = format!("{}_FILE", key);
    let Some(file_path) = source.lookup(&file_var_name) else {
        return Ok(None);
    };

    fs::read_to_string(&file_path)
        .map(|s| Some(s.trim().to_string()))
        .map_err(|e| TenvError::FileRead {
            name: file_var_name,
            path: file_path,
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    #[serial]
    fn test_process_env_lookup() {
        env::set_var("TENV_SOURCE_TEST", "value");
        assert_eq!(
            ProcessEnv.lookup("TENV_SOURCE_TEST"),
            Some("value".to_string())
        );
        env::remove_var("TENV_SOURCE_TEST");
        assert_eq!(ProcessEnv.lookup("TENV_SOURCE_TEST"), None);
    }

    #[test]
    fn test_map_lookup_is_case_sensitive() {
        let env = table(&[("HOST", "localhost")]);
        assert_eq!(env.lookup("HOST"), Some("localhost".to_string()));
        assert_eq!(env.lookup("host"), None);
    }

    #[test]
    fn test_read_file_value_trims_content() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "  secret_value  ").unwrap();

        let env = table(&[("API_KEY_FILE", temp_file.path().to_str().unwrap())]);
        let value = read_file_value(&env, "API_KEY").unwrap();
        assert_eq!(value, Some("secret_value".to_string()));
    }

    #[test]
    fn test_read_file_value_unset() {
        let env: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(read_file_value(&env, "API_KEY").unwrap(), None);
    }

    #[test]
    fn test_read_file_value_missing_file() {
        let env = table(&[("API_KEY_FILE", "/nonexistent/file/path")]);
        match read_file_value(&env, "API_KEY") {
            Err(TenvError::FileRead { name, path, .. }) => {
                assert_eq!(name, "API_KEY_FILE");
                assert_eq!(path, "/nonexistent/file/path");
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}

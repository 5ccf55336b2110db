//! Populate configuration structs from environment variables
//!
//! `tenv` fills an existing struct in place from the process environment.
//! Each public field is looked up under its upper-cased name, or under the
//! override given with `#[tenv(name = "...")]`, and the value is converted to
//! the field's scalar type.
//!
//! # Features
//!
//! - **Declarative**: Field table generated with `#[derive(Tenv)]`
//! - **In place**: Unset or empty variables leave the current value alone
//! - **Base-aware integers**: `0x`, `0o`, `0b` prefixes and `_` separators
//! - **File-based secrets**: Opt-in `{KEY}_FILE` fallback per field
//! - **Injectable sources**: Populate from a map instead of the process environment
//!
//! # Value Parsing
//!
//! - Strings: assigned verbatim, `HOST=localhost`
//! - Integers (`i8`..`i128`, `isize`, `u8`..`u128`, `usize`): `PORT=8080`, `MASK=0xff`
//! - Booleans: `1`, `t`, `true`, `0`, `f`, `false` in any case
//! - Floats (`f32`, `f64`): `RATIO=0.75`, `LIMIT=1e6`
//!
//! Other field types (`Vec`, maps, nested records, enums, `Duration`, ...) are
//! left untouched; they do not need to implement anything.
//!
//! # Example
//!
//! ```rust
//! use tenv::Tenv;
//!
//! #[derive(Debug, Default, Tenv)]
//! struct Config {
//!     // Read from APP_HOST
//!     #[tenv(name = "app_host")]
//!     pub host: String,
//!
//!     // Read from APP_PORT
//!     #[tenv(name = "app_port")]
//!     pub port: u16,
//!
//!     // Private fields are never touched
//!     secret: String,
//! }
//!
//! # fn main() -> Result<(), tenv::TenvError> {
//! #     std::env::set_var("APP_HOST", "localhost");
//! #     std::env::set_var("APP_PORT", "8080");
//! let mut config = Config::default();
//! tenv::populate_from_env(&mut config)?;
//! #     assert_eq!(config.host, "localhost");
//! #     assert_eq!(config.port, 8080);
//! #     assert_eq!(config.secret, "");
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[tenv(name = "KEY")]`
//!
//! Look the field up under `KEY` instead of its name. The key is upper-cased,
//! so `#[tenv(name = "log_level")]` reads `LOG_LEVEL`. The shorthand
//! `#[tenv = "KEY"]` is equivalent.
//!
//! ## `#[tenv(from_file)]`
//!
//! When the variable is unset, read the file named by `{KEY}_FILE` instead.
//! Useful for Kubernetes and Docker secrets.
//!
//! ```rust
//! # use tenv::Tenv;
//! #[derive(Default, Tenv)]
//! pub struct Config {
//!     // Reads API_KEY, or the file at API_KEY_FILE
//!     #[tenv(from_file)]
//!     pub api_key: String,
//! }
//! ```
//!
//! ## `#[tenv(skip)]`
//!
//! Exclude a public field. Private fields are always excluded.
//!
//! # Nested records
//!
//! A field of type `Option<R>` where `R` derives `Tenv` is set to
//! `Some(R::default())` when it is `None`. The nested record's own fields are
//! not populated.

mod bind;
mod convert;
mod error;
mod field;
mod inspect;
mod source;

// Used by `#[derive(Tenv)]` expansions.
#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use bind::{populate_from_env, populate_from_source};
pub use convert::convert_and_set_field;
pub use error::{ConversionError, TenvError};
pub use field::{EnvField, FieldRef, FloatRef, IntRef, UintRef};
pub use inspect::{collect_field_info, Binding};
pub use source::{EnvSource, ProcessEnv};
pub use tenv_derive::Tenv;

//! `restep.toml` configuration loading for the restep toolchain.
//!
//! Every setting has a default, so the configuration file is optional;
//! command-line flags override whatever the file provides.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config_file, load_config_from_str};
pub use types::{ClassifyConfig, EncodingKind, HarnessConfig, HarnessStyle, ReplayConfig, TraceConfig};

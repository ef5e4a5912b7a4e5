//! Filesystem primitives for the project configuration resolver
//!
//! Provides normalized paths with posix and native forms, structured data
//! loading, and label file parsing. Everything here is read-only.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod properties;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::{NormalizedPath, absolute};
pub use properties::{parse_properties, read_properties};

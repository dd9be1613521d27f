//! Layered zypper.conf resolution
//!
//! This crate decides which configuration files apply to an invocation,
//! loads them into one tree and answers `section/option` lookups with a
//! fixed precedence:
//!
//! 1. **Custom** - an explicit file given by the caller, replacing 2 and 3
//! 2. **User** - `$HOME/.zypper.conf`
//! 3. **Global** - `/etc/zypp/zypper.conf`
//!
//! # Architecture
//!
//! ```text
//!              zconf-cli
//!                  |
//!             zconf-core
//!                  |
//!          +-------+-------+
//!          |               |
//!      zconf-tree      zconf-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use zconf_core::{ConfigEngine, Environment};
//!
//! let engine = ConfigEngine::open(None, &Environment::from_process())?;
//! let alias = engine.get_option_str("main/showAlias")?;
//! ```

pub mod config;
pub mod error;

pub use config::{
    ConfigEngine, Environment, OptionId, OptionPath, PathResolver, ResolvedOption, Source,
    SourceKind, SourceSelector,
};
pub use error::{Error, Result};

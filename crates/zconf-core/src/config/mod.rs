//! Configuration source selection and option resolution
//!
//! # Source Hierarchy
//!
//! Sources are consulted in precedence order, first hit wins:
//!
//! 1. **Custom** - explicit file, only if it exists; replaces the pair below
//! 2. **User** - `<home>/.zypper.conf`, skipped without a home directory
//! 3. **Global** - `/etc/zypp/zypper.conf`, included by the tree engine
//!
//! A source that is absent is not an error. A source that is present but
//! malformed only fails [`ConfigEngine::open`] when no other source loaded.
//!
//! # Example
//!
//! ```ignore
//! use zconf_core::config::{ConfigEngine, Environment, OptionId};
//!
//! let env = Environment::new("/").with_home("/home/user");
//! let engine = ConfigEngine::open(None, &env)?;
//!
//! let id: OptionId = "download/max_concurrent".parse()?;
//! println!("{}", engine.get_option(&id));
//! ```

mod engine;
mod environment;
mod resolver;
mod source;

pub use engine::{ConfigEngine, ResolvedOption};
pub use environment::Environment;
pub use resolver::{OptionId, OptionPath, PathResolver};
pub use source::{Source, SourceKind, SourceSelector, USER_CONFIG_NAME};

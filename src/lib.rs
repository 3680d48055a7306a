//! Install an npm package on demand and load its exports.
//!
//! ```text
//! identifier ─► parse ─► alias ─► probe ─► install? ─► probe ─► import
//! ```
//!
//! Packages are installed globally under a per-version alias
//! (`@scope/pkg@1.0.0` lives in `<npm root -g>/scope-pkg-v1.0.0`), so
//! several versions coexist and a pinned version that already resolves is
//! never installed twice. `latest` is reinstalled on every call.

pub mod alias;
pub mod api;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod install;
pub mod loader;
pub mod resolve;
pub mod runner;
pub mod specifier;

#[cfg(test)]
pub(crate) mod testing;

pub use alias::build_alias;
pub use api::{use_package, Importer, ResolvedPackage};
pub use config::UseConfig;
pub use error::{CommandError, LoadFailure, UseError};
pub use loader::{ModuleExports, ModuleLoader, NodeLoader};
pub use runner::{CommandLine, CommandOutput, CommandRunner, SystemRunner};
pub use specifier::{parse, PackageSpec, ParseError, ParseErrorKind, LATEST};
